//! Application configuration loaded from environment variables.
//!
//! Every setting has a default, so an empty environment yields a working
//! NIFTY 50 ticker:
//! - `TICKER_SYMBOL`: instrument symbol (default `^NSEI`)
//! - `TICKER_QUOTE_URL`: quote provider base URL
//! - `TICKER_REFRESH_MS`: refresh interval in milliseconds (default 5000)
//! - `TICKER_HISTORY_CAPACITY`: chart history length (default 20)
//! - `TICKER_MARKET_TZ`: IANA timezone of the exchange (default `Asia/Kolkata`)
//! - `TICKER_MARKET_OPEN` / `TICKER_MARKET_CLOSE`: `HH:MM` session bounds
//! - `TICKER_CACHE_DIR`: directory for the last-session record and log file
//! - `TICKER_HEADLESS`: any non-empty value disables the TUI

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

/// Default instrument: NIFTY 50.
const DEFAULT_SYMBOL: &str = "^NSEI";

/// Default quote provider base URL.
const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com";

const DEFAULT_REFRESH_MS: u64 = 5000;
const DEFAULT_HISTORY_CAPACITY: usize = 20;
const DEFAULT_MARKET_TZ: &str = "Asia/Kolkata";

/// 09:15 in minutes since midnight.
const DEFAULT_OPEN_MINUTE: u32 = 9 * 60 + 15;

/// 15:30 in minutes since midnight.
const DEFAULT_CLOSE_MINUTE: u32 = 15 * 60 + 30;

/// Directory name used under the platform cache dir.
const CACHE_DIR_NAME: &str = "tickline";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub market: MarketConfig,
    pub ticker: TickerConfig,
}

/// Upstream quote provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub symbol: String,
    /// Per-request timeout. Equal to the refresh interval so a request
    /// never outlives the next scheduled tick by much.
    pub timeout: Duration,
}

/// Trading session definition.
#[derive(Debug, Clone, Copy)]
pub struct MarketConfig {
    pub timezone: Tz,
    pub open_minute: u32,
    pub close_minute: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Kolkata,
            open_minute: DEFAULT_OPEN_MINUTE,
            close_minute: DEFAULT_CLOSE_MINUTE,
        }
    }
}

/// Refresh loop and display settings.
#[derive(Debug, Clone)]
pub struct TickerConfig {
    pub refresh_interval: Duration,
    pub history_capacity: usize,
    pub cache_dir: PathBuf,
    pub headless: bool,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TickerError::Config`](crate::TickerError::Config) if a
/// numeric value does not parse or is zero, if the timezone is not a
/// known IANA name, or if the session window is empty or malformed. A
/// bad timezone must abort startup: silently defaulting would corrupt
/// every open/closed decision without any visible symptom.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let symbol = non_empty_var("TICKER_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let base_url =
        non_empty_var("TICKER_QUOTE_URL").unwrap_or_else(|| DEFAULT_QUOTE_URL.to_string());

    let refresh_ms = parse_positive("TICKER_REFRESH_MS", DEFAULT_REFRESH_MS)?;
    let history_capacity = parse_positive("TICKER_HISTORY_CAPACITY", DEFAULT_HISTORY_CAPACITY)?;

    let tz_name = non_empty_var("TICKER_MARKET_TZ").unwrap_or_else(|| DEFAULT_MARKET_TZ.to_string());
    let timezone = Tz::from_str(&tz_name).map_err(|e| {
        crate::TickerError::Config(format!("TICKER_MARKET_TZ {tz_name:?} is not a timezone: {e}"))
    })?;

    let open_minute = match non_empty_var("TICKER_MARKET_OPEN") {
        Some(value) => parse_minute_of_day("TICKER_MARKET_OPEN", &value)?,
        None => DEFAULT_OPEN_MINUTE,
    };
    let close_minute = match non_empty_var("TICKER_MARKET_CLOSE") {
        Some(value) => parse_minute_of_day("TICKER_MARKET_CLOSE", &value)?,
        None => DEFAULT_CLOSE_MINUTE,
    };
    if open_minute >= close_minute {
        return Err(crate::TickerError::Config(
            "TICKER_MARKET_OPEN must be earlier than TICKER_MARKET_CLOSE".to_string(),
        ));
    }

    let cache_dir = non_empty_var("TICKER_CACHE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(default_cache_dir);

    let refresh_interval = Duration::from_millis(refresh_ms);

    Ok(AppConfig {
        provider: ProviderConfig {
            base_url,
            symbol,
            timeout: refresh_interval,
        },
        market: MarketConfig {
            timezone,
            open_minute,
            close_minute,
        },
        ticker: TickerConfig {
            refresh_interval,
            history_capacity,
            cache_dir,
            headless: non_empty_var("TICKER_HEADLESS").is_some(),
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Parses a strictly positive integer variable, falling back to `default` when unset.
fn parse_positive<T>(name: &str, default: T) -> crate::Result<T>
where
    T: FromStr + PartialEq + Default,
{
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|_| crate::TickerError::Config(format!("{name} must be a positive integer")))?;
    if value == T::default() {
        return Err(crate::TickerError::Config(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(value)
}

/// Parses `HH:MM` into minutes since midnight.
fn parse_minute_of_day(name: &str, value: &str) -> crate::Result<u32> {
    let invalid = || crate::TickerError::Config(format!("{name} must be HH:MM, got {value:?}"));

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{CACHE_DIR_NAME}")))
}
