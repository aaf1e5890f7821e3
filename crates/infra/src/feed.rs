//! Periodic inventory feed.
//!
//! Each subscriber gets its own ticker task. The first frame is produced
//! immediately, then one per interval. Dropping the subscription cancels the
//! task, as does the receiving side going away.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::analytics::InventoryAnalytics;
use crate::db::Database;

const FRAME_BUFFER: usize = 4;

#[derive(Debug, Clone)]
pub struct InventoryFeed {
    analytics: InventoryAnalytics,
    interval: Duration,
}

impl InventoryFeed {
    pub fn new(db: Database, interval: Duration) -> Self {
        Self {
            analytics: InventoryAnalytics::new(db),
            interval,
        }
    }

    /// Start a ticker for one subscriber. Frames are JSON arrays of the full
    /// inventory view.
    pub fn subscribe(&self) -> FeedSubscription {
        let (tx, rx) = mpsc::channel(FRAME_BUFFER);
        let token = CancellationToken::new();

        tokio::spawn(run(self.analytics.clone(), self.interval, tx, token.clone()));
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "feed subscriber attached");

        FeedSubscription {
            frames: rx,
            _guard: token.drop_guard(),
        }
    }
}

async fn run(
    analytics: InventoryAnalytics,
    period: Duration,
    tx: mpsc::Sender<String>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = tx.closed() => break,
            _ = ticker.tick() => {}
        }

        let frame = match analytics.all_inventory().await {
            Ok(rows) => match serde_json::to_string(&rows) {
                Ok(json) => json,
                Err(err) => {
                    tracing::warn!(error = %err, "inventory frame serialization failed");
                    continue;
                }
            },
            Err(err) => {
                // Skip this tick; the next one retries.
                tracing::warn!(error = %err, "inventory frame query failed");
                continue;
            }
        };

        // Cancellation also interrupts a send parked on a full channel.
        tokio::select! {
            _ = token.cancelled() => break,
            sent = tx.send(frame) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!("feed subscriber detached");
}

/// Receiving end of one feed subscription. Dropping it stops the ticker.
#[derive(Debug)]
pub struct FeedSubscription {
    frames: mpsc::Receiver<String>,
    _guard: DropGuard,
}

impl FeedSubscription {
    /// Next frame, or `None` once the ticker has stopped.
    pub async fn recv(&mut self) -> Option<String> {
        self.frames.recv().await
    }
}

impl tokio_stream::Stream for FeedSubscription {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.frames.poll_recv(cx)
    }
}
