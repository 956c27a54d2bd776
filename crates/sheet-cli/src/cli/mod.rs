use anyhow::Context;
use clap::Parser;
use sheet_core::backoff::BackoffController;
use sheet_core::config::{AppConfig, default_config_path};
use sheet_core::model::{Credential, RangeRequest, ValueTable};
use sheet_core::orchestrator::{ReadOrchestrator, RetryPolicy};
use sheet_core::provider::{AuthProvider, StaticToken};
use sheet_providers::GoogleSheetsClient;
use sheet_providers::auth::{self, KeyringAuth, OAuthToken, TokenStatus};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod config_cmd;
mod info_cmd;
mod read_cmd;
mod shared;
mod token_cmd;

use args::*;

use config_cmd::handle_config;
use info_cmd::handle_info;
use read_cmd::handle_read;
use shared::*;
use token_cmd::handle_token;

pub fn run() -> anyhow::Result<()> {
    app::run()
}
