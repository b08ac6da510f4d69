mod cli;
mod config;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use scout_core::{RankedResult, ResultRecord};
use scout_engine::{ImageScraper, ScrapeHandle, ScrapeListener, ScrapeRequest};

use crate::cli::Cli;
use crate::config::AppConfig;

/// Keeps the terminal result for printing once the scrape thread is done.
#[derive(Default)]
struct CollectingListener {
    result: Mutex<Option<RankedResult>>,
}

impl ScrapeListener for CollectingListener {
    fn on_started(&self) {
        engine_info!("scrape started");
    }

    fn on_finished(&self, result: RankedResult) {
        if let Ok(mut slot) = self.result.lock() {
            *slot = Some(result);
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match cli.log_file.as_deref() {
        Some(path) => engine_logging::initialize(LogDestination::Both(path), level),
        None => engine_logging::initialize(LogDestination::Terminal, level),
    }

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let scraper =
        ImageScraper::new(config.into_scrape_config()).context("building HTTP clients")?;

    let mut request = ScrapeRequest::new(cli.url, cli.count);
    request.title = cli.title;
    request.user_agent = cli.user_agent;

    let listener = Arc::new(CollectingListener::default());
    ScrapeHandle::start(scraper, request, Some(listener.clone())).join();

    let result = listener
        .result
        .lock()
        .map_err(|_| anyhow::anyhow!("result lock poisoned"))?
        .take()
        .context("scrape finished without a result")?;

    let record = ResultRecord::from(&result);
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(if result.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
