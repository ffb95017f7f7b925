//! `cfx spaces` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;

use cfx_config::Config;
use cfx_confluence::{ConfluenceClient, ExtractError, WikiApi};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the spaces command.
#[derive(Args)]
pub(crate) struct SpacesArgs {
    /// Path to configuration file (default: auto-discover cfx.toml).
    #[arg(short, long, env = "CFX_CONFIG")]
    config: Option<PathBuf>,
}

impl SpacesArgs {
    /// Execute the spaces command.
    ///
    /// Lists every visible space as `KEY<TAB>Name` on stdout, which doubles
    /// as a check of the URL and credentials.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let conf = config.require_confluence()?;
        let client = ConfluenceClient::new(&conf.base_url, &conf.username, &conf.api_token)?;

        let spaces = client.list_spaces().map_err(ExtractError::Connection)?;

        let mut stdout = io::stdout().lock();
        for space in &spaces {
            writeln!(stdout, "{}\t{}", space.key, space.name)?;
        }
        output.success(&format!("{} spaces", spaces.len()));
        Ok(())
    }
}
