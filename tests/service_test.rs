//! Refresh loop scheduling.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::timeout;

use tickline::calendar::MarketCalendar;
use tickline::history::PriceHistory;
use tickline::pipeline::QuotePipeline;
use tickline::records::HistoricalRecordStore;
use tickline::service::spawn_ticker;
use tickline::simulation::QuoteSimulator;
use tickline::tui::Message;

use common::{
    CountingStore, FakeHistorical, FakeLive, FixedClock, live_quote, market_open_instant,
};

fn pipeline(
    live: Arc<FakeLive>,
) -> QuotePipeline<Arc<FakeLive>, FakeHistorical, CountingStore, FixedClock> {
    QuotePipeline::with_parts(
        MarketCalendar::default(),
        live,
        HistoricalRecordStore::new(FakeHistorical::failing(), CountingStore::default()),
        PriceHistory::new(20),
        QuoteSimulator::seeded(5),
        FixedClock(market_open_instant()),
    )
}

async fn next_tick(rx: &mut mpsc::UnboundedReceiver<Message>) -> Vec<f64> {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Some(Message::Tick(outcome))) => outcome.history,
        other => panic!("expected a tick, got {other:?}"),
    }
}

#[tokio::test]
async fn first_tick_is_immediate_and_ticks_repeat() {
    let live = Arc::new(FakeLive::ok(live_quote(24400.0)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_ticker(pipeline(live.clone()), Duration::from_millis(30), tx);

    assert_eq!(next_tick(&mut rx).await.len(), 1);
    assert_eq!(next_tick(&mut rx).await.len(), 2);
    assert_eq!(next_tick(&mut rx).await.len(), 3);

    handle.shutdown().await;
    assert!(live.call_count() >= 3);
}

#[tokio::test]
async fn refresh_now_ticks_before_the_interval() {
    let live = Arc::new(FakeLive::ok(live_quote(24400.0)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_ticker(pipeline(live), Duration::from_secs(3600), tx);

    assert_eq!(next_tick(&mut rx).await.len(), 1);
    handle.refresh_now();
    assert_eq!(next_tick(&mut rx).await.len(), 2);

    handle.shutdown().await;
}

#[tokio::test]
async fn shutdown_stops_the_loop() {
    let live = Arc::new(FakeLive::ok(live_quote(24400.0)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_ticker(pipeline(live), Duration::from_millis(20), tx);

    next_tick(&mut rx).await;
    handle.shutdown().await;

    // The loop owned the only sender, so the channel drains and closes.
    let drained = timeout(Duration::from_secs(2), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());
}

#[tokio::test]
async fn loop_ends_when_receiver_is_dropped() {
    let live = Arc::new(FakeLive::ok(live_quote(24400.0)));
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = spawn_ticker(pipeline(live), Duration::from_millis(10), tx);
    drop(rx);

    let finished = timeout(Duration::from_secs(2), async {
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(finished.is_ok());
}

/// Counts ticks received until `window` elapses.
async fn ticks_within(rx: &mut mpsc::UnboundedReceiver<Message>, window: Duration) -> usize {
    let mut ticks = 0;
    let _ = timeout(window, async {
        while let Some(message) = rx.recv().await {
            if matches!(message, Message::Tick(_)) {
                ticks += 1;
            }
        }
    })
    .await;
    ticks
}

#[tokio::test]
async fn refresh_requests_during_a_slow_tick_collapse_into_one() {
    let live = Arc::new(FakeLive::slow(
        live_quote(24400.0),
        Duration::from_millis(200),
    ));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_ticker(pipeline(live.clone()), Duration::from_secs(3600), tx);

    // Let the first tick start its fetch, then press refresh repeatedly.
    tokio::time::sleep(Duration::from_millis(50)).await;
    for _ in 0..5 {
        handle.refresh_now();
    }

    let ticks = ticks_within(&mut rx, Duration::from_millis(900)).await;
    handle.shutdown().await;

    assert_eq!(ticks, 2, "one scheduled tick plus one collapsed refresh");
    assert_eq!(live.call_count(), 2);
    assert_eq!(live.max_in_flight(), 1);
}

#[tokio::test]
async fn ticks_missed_during_a_slow_fetch_are_dropped() {
    let fetch = Duration::from_millis(200);
    let live = Arc::new(FakeLive::slow(live_quote(24400.0), fetch));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let started = Instant::now();
    let handle = spawn_ticker(pipeline(live.clone()), Duration::from_millis(30), tx);

    let ticks = ticks_within(&mut rx, Duration::from_millis(1000)).await;
    let elapsed = started.elapsed();
    handle.shutdown().await;

    // A 30 ms period would allow ~33 ticks; serialized 200 ms fetches allow
    // one per fetch, plus slack for the fetch in flight at shutdown.
    let ceiling = (elapsed.as_millis() / fetch.as_millis()) as usize + 2;
    assert!(ticks >= 3, "only {ticks} ticks in {elapsed:?}");
    assert!(live.call_count() <= ceiling, "{} fetches in {elapsed:?}", live.call_count());
    assert_eq!(live.max_in_flight(), 1);
}
