//! Single-timer refresh loop.
//!
//! One task owns the [`QuotePipeline`] and drives it from one interval.
//! A tick is awaited to completion before the next can start, so cache
//! writes and history appends never interleave; ticks that fall due while
//! a slow request is in flight are skipped, not queued, and at most one
//! manual refresh waits behind an in-flight tick.

use std::time::Duration;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::pipeline::{Clock, QuotePipeline};
use crate::sources::{HistoricalQuoteSource, LiveQuoteSource};
use crate::store::KeyValueStore;
use crate::tui::Message;

/// Commands sent from the UI to the refresh loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    /// Run a tick now and restart the interval.
    RefreshNow,
}

/// Controls a running refresh loop. Dropping it stops the loop.
pub struct TickerHandle {
    commands: mpsc::Sender<ServiceCommand>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Requests an immediate tick. Requests made while one is already
    /// pending collapse into it.
    pub fn refresh_now(&self) {
        match self.commands.try_send(ServiceCommand::RefreshNow) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("Refresh already pending"),
            Err(TrySendError::Closed(_)) => debug!("Refresh requested after ticker stopped"),
        }
    }

    /// Cancels the timer, abandons any in-flight tick, and waits for the
    /// task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("Ticker task ended abnormally: {e}");
        }
    }

    /// Returns `true` once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns the refresh loop. The first tick runs immediately; each
/// outcome is sent as [`Message::Tick`]. The loop ends on shutdown or
/// when `tx` is closed.
pub fn spawn_ticker<L, H, S, C>(
    mut pipeline: QuotePipeline<L, H, S, C>,
    period: Duration,
    tx: mpsc::UnboundedSender<Message>,
) -> TickerHandle
where
    L: LiveQuoteSource + 'static,
    H: HistoricalQuoteSource + 'static,
    S: KeyValueStore + 'static,
    C: Clock + 'static,
{
    let (commands, mut cmd_rx) = mpsc::channel(1);
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut timer = tokio::time::interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(period_ms = period.as_millis() as u64, "Ticker started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => break,
                Some(ServiceCommand::RefreshNow) = cmd_rx.recv() => {
                    debug!("Manual refresh");
                    timer.reset();
                }
                _ = timer.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = shutdown_rx.changed() => break,
                outcome = pipeline.tick() => outcome,
            };

            if tx.send(Message::Tick(outcome)).is_err() {
                break;
            }
        }

        info!("Ticker stopped");
    });

    TickerHandle {
        commands,
        shutdown,
        task,
    }
}
