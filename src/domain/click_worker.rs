//! Background worker persisting click events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Attempts per click before it is given up.
const MAX_ATTEMPTS: usize = 3;

/// Drains the click channel until every sender is dropped.
///
/// Up to `concurrency` clicks are written at once. Each write is retried with
/// jittered exponential backoff; a click whose link no longer exists is not
/// retried. Failures are logged and counted, never propagated.
pub async fn run_click_worker<R>(
    mut rx: mpsc::Receiver<ClickEvent>,
    stats_repository: Arc<R>,
    concurrency: usize,
) where
    R: StatsRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let repository = stats_repository.clone();

        tokio::spawn(async move {
            persist_click(repository.as_ref(), event.into()).await;
            drop(permit);
        });
    }

    // wait for in-flight writes
    let _ = permits.acquire_many(concurrency.max(1) as u32).await;
    debug!("Click worker stopped");
}

/// Waits for a worker whose senders are all dropped to flush its queue.
///
/// Gives up after `grace`; clicks still queued at that point are lost.
pub async fn drain_click_worker(handle: JoinHandle<()>, grace: Duration) {
    match tokio::time::timeout(grace, handle).await {
        Ok(Ok(())) => info!("Click queue drained"),
        Ok(Err(e)) => warn!(error = %e, "Click worker panicked"),
        Err(_) => warn!(grace_secs = grace.as_secs(), "Click queue not drained in time"),
    }
}

async fn persist_click<R>(repository: &R, click: NewClick)
where
    R: StatsRepository + ?Sized,
{
    let link_id = click.link_id;
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = Retry::spawn(strategy, || {
        let click = click.clone();
        async move {
            match repository.record_click(click).await {
                Err(AppError::NotFound { .. }) => Ok(None),
                Err(e) => Err(e),
                Ok(recorded) => Ok(Some(recorded)),
            }
        }
    })
    .await;

    match result {
        Ok(Some(_)) => {
            metrics::counter!("linkis_clicks_recorded_total").increment(1);
        }
        Ok(None) => {
            debug!(link_id, "Click dropped, link no longer exists");
            metrics::counter!("linkis_clicks_dropped_total", "reason" => "deleted").increment(1);
        }
        Err(e) => {
            warn!(link_id, error = %e, "Failed to record click");
            metrics::counter!("linkis_clicks_failed_total").increment(1);
        }
    }
}
