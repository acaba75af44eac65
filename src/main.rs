use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use rust_ticket_scraper::browser::Session;
use rust_ticket_scraper::config::{Config, Credentials};
use rust_ticket_scraper::console::{self, Reply};
use rust_ticket_scraper::render;
use rust_ticket_scraper::service::BoxOffice;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const LOG_CONFIG: &str = "log4rs.yml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::load();
    let credentials = Credentials::from_env()?;

    log::info!("Back office: {}", config.back_office.base_url);
    log::info!("  Headless: {}", config.browser.headless);
    log::info!("  Page timeout: {}s", config.browser.page_timeout_secs);

    // Listen before launching Chrome so a signal during login still ends in a clean close
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let opening = {
        let settings = config.browser.clone();
        let office = config.back_office.clone();
        tokio::task::spawn_blocking(move || Session::open(&settings, &office, &credentials))
    };
    let session = tokio::select! {
        _ = &mut shutdown => return Ok(()),
        opened = opening => opened??,
    };

    let office = Arc::new(BoxOffice::new(session, config));
    log::info!("Box office console started");

    let result = run_console(office.clone(), shutdown).await;

    let closing = office.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || closing.shutdown()).await {
        log::error!("Shutdown task failed: {}", e);
    }
    log::info!("Box office console stopped");

    result.map_err(Into::into)
}

async fn run_console(
    office: Arc<BoxOffice>,
    mut shutdown: Pin<&mut impl Future<Output = ()>>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}\n", render::HELP);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log::info!("Input closed");
                    break;
                };

                let handler_office = office.clone();
                let task = tokio::task::spawn_blocking(move || {
                    console::handle_line(&handler_office, &line)
                });

                tokio::select! {
                    _ = &mut shutdown => break,
                    reply = task => match reply {
                        Ok(Reply::Quit) => break,
                        Ok(Reply::Messages(messages)) => {
                            for message in messages {
                                println!("{}\n", message);
                            }
                        }
                        Err(e) => log::error!("Request handler failed: {}", e),
                    },
                }
            }
        }
    }

    Ok(())
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("SIGINT received, shutting down"),
        _ = terminate => log::info!("SIGTERM received, shutting down"),
    }
}

/// `LOG_LEVEL` wins over `log4rs.yml`; without either, log INFO to stdout
fn init_logging() {
    let env_level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok());

    if env_level.is_none() && Path::new(LOG_CONFIG).exists() {
        match log4rs::init_file(LOG_CONFIG, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Could not load {}: {}", LOG_CONFIG, e),
        }
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} | {l} | {m}{n}")))
        .build();

    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(
            Root::builder()
                .appender("stdout")
                .build(env_level.unwrap_or(LevelFilter::Info)),
        );

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Logger already initialized: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid logging configuration: {}", e),
    }
}
