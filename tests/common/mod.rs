//! Shared test doubles for pipeline and record-store tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;

use tickline::models::{HistoricalFields, Provenance, Quote};
use tickline::pipeline::Clock;
use tickline::sources::{HistoricalQuoteSource, LiveQuoteSource};
use tickline::store::{KeyValueStore, MemoryStore};
use tickline::{Result, TickerError};

/// 10:00 IST on Tuesday 2024-01-02.
pub fn market_open_instant() -> DateTime<Utc> {
    ist(2024, 1, 2, 10, 0)
}

/// 11:00 IST on Saturday 2024-01-06.
pub fn market_closed_instant() -> DateTime<Utc> {
    ist(2024, 1, 6, 11, 0)
}

pub fn ist(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Kolkata
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn live_quote(price: f64) -> Quote {
    Quote {
        price,
        change: price - 24000.0,
        change_percent: (price - 24000.0) / 24000.0 * 100.0,
        day_high: price + 50.0,
        day_low: price - 50.0,
        open: 24010.0,
        previous_close: 24000.0,
        is_stale: false,
        observed_at: market_open_instant(),
        provenance: Provenance::Live,
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock returning the given instants in turn, repeating the last.
pub struct SequenceClock {
    instants: Mutex<Vec<DateTime<Utc>>>,
}

impl SequenceClock {
    pub fn new(mut instants: Vec<DateTime<Utc>>) -> Self {
        instants.reverse();
        Self {
            instants: Mutex::new(instants),
        }
    }
}

impl Clock for SequenceClock {
    fn now(&self) -> DateTime<Utc> {
        let mut instants = self.instants.lock().unwrap();
        if instants.len() > 1 {
            instants.pop().unwrap()
        } else {
            *instants.last().unwrap()
        }
    }
}

/// Live source that always succeeds or always fails, optionally after a
/// delay. Tracks how many fetches overlap.
pub struct FakeLive {
    quote: Option<Quote>,
    delay: Duration,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeLive {
    pub fn ok(quote: Quote) -> Self {
        Self::build(Some(quote), Duration::ZERO)
    }

    pub fn failing() -> Self {
        Self::build(None, Duration::ZERO)
    }

    pub fn slow(quote: Quote, delay: Duration) -> Self {
        Self::build(Some(quote), delay)
    }

    fn build(quote: Option<Quote>, delay: Duration) -> Self {
        Self {
            quote,
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Largest number of fetches observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiveQuoteSource for FakeLive {
    async fn fetch_live(&self) -> Result<Quote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.quote
            .clone()
            .ok_or_else(|| TickerError::MalformedPayload("fake live failure".to_string()))
    }
}

/// Historical source that always succeeds or always fails.
pub struct FakeHistorical {
    fields: Option<HistoricalFields>,
    pub calls: AtomicUsize,
}

impl FakeHistorical {
    pub fn ok(fields: HistoricalFields) -> Self {
        Self {
            fields: Some(fields),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fields: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoricalQuoteSource for FakeHistorical {
    async fn fetch_historical(&self) -> Result<HistoricalFields> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fields
            .clone()
            .ok_or_else(|| TickerError::Io("fake historical failure".to_string()))
    }
}

/// In-memory store that counts writes.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.inner.set(key, value).unwrap();
        store
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}
