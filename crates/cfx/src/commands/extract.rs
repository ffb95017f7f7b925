//! `cfx extract` command implementation.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use cfx_config::{CliSettings, Config, ConfigError};
use cfx_confluence::timestamp::{
    DEFAULT_WATERMARK, default_watermark, format_timestamp, parse_timestamp,
};
use cfx_confluence::{ConfluenceClient, ExtractOptions, Extractor, WikiApi};
use cfx_output::{DataDir, PAGES_TABLE, RunState, TableManifest, TableWriter};
use chrono::{DateTime, Utc};
use clap::Args;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the extract command.
#[derive(Args)]
pub(crate) struct ExtractArgs {
    /// Path to configuration file (default: auto-discover cfx.toml).
    #[arg(short, long, env = "CFX_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory holding in/ and out/ (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Only extract pages updated since the last successful run.
    #[arg(long)]
    incremental: bool,

    /// Keep raw storage markup instead of converting it to text.
    #[arg(long)]
    no_beautify: bool,

    /// Pages requested per listing call (overrides config).
    #[arg(long)]
    page_size: Option<usize>,
}

impl ExtractArgs {
    /// Execute the extract command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let started = Utc::now();
        let output = Output::new();

        let cli_settings = CliSettings {
            data_dir: self.data_dir,
            incremental: self.incremental.then_some(true),
            beautify: self.no_beautify.then_some(false),
            page_size: self.page_size,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let conf = config.require_confluence()?;

        let data_dir = DataDir::new(&config.output_resolved.data_dir);
        let incremental = config.extract.incremental;
        let since = if incremental {
            Some(read_watermark(&data_dir)?)
        } else {
            None
        };
        let page_size = NonZeroUsize::new(config.extract.page_size).ok_or_else(|| {
            ConfigError::Validation("extract.page_size must be greater than 0".to_owned())
        })?;

        let client = ConfluenceClient::new(&conf.base_url, &conf.username, &conf.api_token)?;
        output.info(&format!("Extracting pages from {}...", client.base_url()));

        let options = ExtractOptions {
            since,
            beautify: config.extract.beautify,
            page_size,
        };
        let emitted = run_extraction(&client, options, &data_dir, incremental, started)?;

        if emitted == 0 {
            output.warning("No pages matched.");
        }
        output.success(&format!(
            "Extracted {emitted} pages to {}",
            data_dir.table(PAGES_TABLE).display()
        ));
        Ok(())
    }
}

/// Watermark from the input state, or the default when none is recorded.
fn read_watermark(data_dir: &DataDir) -> Result<DateTime<Utc>, CliError> {
    let state = RunState::read(&data_dir.input_state())?;
    match state.last_run {
        Some(last_run) => {
            info!("Using last_run from statefile: {}", last_run);
            parse_timestamp(&last_run).map_err(|source| CliError::State {
                value: last_run,
                source,
            })
        }
        None => {
            info!(
                "No last_run found in statefile, using default timestamp: {}",
                DEFAULT_WATERMARK
            );
            Ok(default_watermark())
        }
    }
}

/// Stream every record into the pages table, then write the manifest and state.
///
/// The table is published only after the last record is written, and the
/// state only after the table, so a failed run leaves the previous outputs
/// and watermark untouched.
fn run_extraction<W: WikiApi + ?Sized>(
    api: &W,
    options: ExtractOptions,
    data_dir: &DataDir,
    incremental: bool,
    started: DateTime<Utc>,
) -> Result<usize, CliError> {
    let extractor = Extractor::new(api, options);
    let mut records = extractor.extract()?;

    let mut table = TableWriter::create(&data_dir.table(PAGES_TABLE))?;
    for record in records.by_ref() {
        table.write(&record?)?;
    }
    let emitted = records.emitted();
    table.finish()?;

    TableManifest::pages(incremental).write(&data_dir.manifest(PAGES_TABLE))?;
    RunState::new(format_timestamp(&started)).write(&data_dir.output_state())?;

    info!("Fetched {} pages in total", emitted);
    Ok(emitted)
}
