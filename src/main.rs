use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::info;

use tickline::TickerError;
use tickline::calendar::MarketCalendar;
use tickline::config::{AppConfig, fetch_config};
use tickline::pipeline::QuotePipeline;
use tickline::presenter::LogPresenter;
use tickline::records::HistoricalRecordStore;
use tickline::service::{TickerHandle, spawn_ticker};
use tickline::sources::YahooQuoteClient;
use tickline::store::FileStore;
use tickline::tui::{self, Action, App, Message};

const LOG_FILE_NAME: &str = "tickline.log";

#[tokio::main]
async fn main() -> Result<(), TickerError> {
    let config = fetch_config()?;
    let headless = config.ticker.headless || !std::io::stdout().is_terminal();

    init_tracing(&config, headless)?;

    let client = YahooQuoteClient::new(&config.provider)?;
    info!(symbol = client.symbol(), headless, "Starting ticker");
    let records = HistoricalRecordStore::new(
        client.clone(),
        FileStore::new(&config.ticker.cache_dir),
    );
    let pipeline = QuotePipeline::new(
        MarketCalendar::from(config.market),
        client,
        records,
        config.ticker.history_capacity,
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let ticker = spawn_ticker(pipeline, config.ticker.refresh_interval, tx.clone());

    if headless {
        run_headless(&config, ticker, rx, tx).await
    } else {
        run_tui(&config, ticker, rx, tx).await
    }
}

/// Logs to stderr when headless, otherwise to a file in the cache dir so
/// the alternate screen stays clean.
fn init_tracing(config: &AppConfig, headless: bool) -> Result<(), TickerError> {
    if headless {
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
        return Ok(());
    }

    fs::create_dir_all(&config.ticker.cache_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.ticker.cache_dir.join(LOG_FILE_NAME))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run_headless(
    config: &AppConfig,
    ticker: TickerHandle,
    mut rx: mpsc::UnboundedReceiver<Message>,
    tx: mpsc::UnboundedSender<Message>,
) -> Result<(), TickerError> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Message::Quit);
        }
    });

    let mut presenter = LogPresenter::new(config.provider.symbol.clone());
    while let Some(message) = rx.recv().await {
        match message {
            Message::Tick(outcome) => outcome.present(&mut presenter),
            Message::Quit => break,
            Message::Input(_) => {}
        }
    }

    ticker.shutdown().await;
    Ok(())
}

async fn run_tui(
    config: &AppConfig,
    ticker: TickerHandle,
    mut rx: mpsc::UnboundedReceiver<Message>,
    tx: mpsc::UnboundedSender<Message>,
) -> Result<(), TickerError> {
    let mut terminal = tui::setup_terminal()?;
    tui::event::spawn_event_reader(tx);

    let mut app = App::new(
        config.provider.symbol.clone(),
        config.market.timezone,
        config.ticker.refresh_interval,
    );

    let result = loop {
        if let Err(e) = terminal.draw(|frame| tui::render(frame, &app)) {
            break Err(TickerError::from(e));
        }

        let Some(message) = rx.recv().await else {
            break Ok(());
        };
        if let Some(Action::Refresh) = tui::event::update(&mut app, message) {
            ticker.refresh_now();
        }
        if app.should_quit {
            break Ok(());
        }
    };

    ticker.shutdown().await;
    tui::restore_terminal(&mut terminal)?;
    result
}
