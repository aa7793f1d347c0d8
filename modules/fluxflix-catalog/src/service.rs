//! Catalog reads plus the per-movie event generator.
//!
//! `events` spawns one producer task per subscription. The producer stamps an
//! event, hands it to a single-slot channel, then sleeps for the configured
//! interval. It never finishes on its own; it stops when the
//! `MovieEventStream` is dropped (task aborted) or its receiver goes away.

use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use fluxflix_common::{Movie, MovieEvent};

use crate::error::Result;
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn CatalogStore>,
    event_interval: Duration,
    active_streams: Arc<AtomicUsize>,
}

impl MovieService {
    pub fn new(store: Arc<dyn CatalogStore>, event_interval: Duration) -> Self {
        Self {
            store,
            event_interval,
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every movie currently in the catalog. Each call issues a fresh query.
    pub async fn all(&self) -> Result<Vec<Movie>> {
        self.store.find_all().await
    }

    pub async fn by_id(&self, id: &str) -> Result<Option<Movie>> {
        self.store.find_by_id(id).await
    }

    /// Start an unbounded event sequence for `movie_id`. The id is echoed,
    /// not checked against the catalog.
    pub fn events(&self, movie_id: &str) -> MovieEventStream {
        let (tx, rx) = mpsc::channel(1);
        let guard = ActiveStream::open(self.active_streams.clone(), movie_id);
        let producer = tokio::spawn(produce(
            movie_id.to_string(),
            self.event_interval,
            tx,
            guard,
        ));
        MovieEventStream { rx, producer }
    }

    /// Number of producer tasks still running.
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::SeqCst)
    }
}

async fn produce(
    movie_id: String,
    interval: Duration,
    tx: mpsc::Sender<MovieEvent>,
    _guard: ActiveStream,
) {
    loop {
        let event = MovieEvent::now(&movie_id);
        if tx.send(event).await.is_err() {
            break;
        }
        tokio::time::sleep(interval).await;
    }
}

/// Counts a live producer. Dropped when the producer returns or is aborted.
struct ActiveStream {
    counter: Arc<AtomicUsize>,
    movie_id: String,
}

impl ActiveStream {
    fn open(counter: Arc<AtomicUsize>, movie_id: &str) -> Self {
        let active = counter.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(movie_id, active_streams = active, "Event stream opened");
        Self {
            counter,
            movie_id: movie_id.to_string(),
        }
    }
}

impl Drop for ActiveStream {
    fn drop(&mut self) {
        let active = self.counter.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(movie_id = %self.movie_id, active_streams = active, "Event stream closed");
    }
}

/// Consumer side of one `MovieService::events` subscription.
pub struct MovieEventStream {
    rx: mpsc::Receiver<MovieEvent>,
    producer: JoinHandle<()>,
}

impl Stream for MovieEventStream {
    type Item = MovieEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for MovieEventStream {
    fn drop(&mut self) {
        self.producer.abort();
    }
}
