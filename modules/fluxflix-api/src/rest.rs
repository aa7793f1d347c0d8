use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, Sse},
        Json,
    },
};
use futures::{Stream, StreamExt};
use tracing::info;

use fluxflix_common::{Movie, UserProfile};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// --- Movies ---

pub async fn list_movies(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Movie>>> {
    Ok(Json(state.movies.all().await?))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Movie>> {
    state
        .movies
        .by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// One `data: {"movieId":..,"date":..}` frame per tick until the client goes away.
pub async fn movie_events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!(movie_id = %id, "Streaming movie events");

    let mut events = state.movies.events(&id);
    let stream = async_stream::stream! {
        while let Some(event) = events.next().await {
            yield Event::default().json_data(&event);
        }
    };

    Sse::new(stream)
}

// --- Users ---

pub async fn current_user(CurrentUser(principal): CurrentUser) -> Json<UserProfile> {
    Json(principal.profile())
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    state
        .users
        .get(&name)
        .map(|p| Json(p.profile()))
        .ok_or(ApiError::NotFound)
}
