//! Command-line host for the message store.
//!
//! # Responsibility
//! - Parse configuration, initialize logging, open the store once.
//! - Dispatch one operation and print its tagged JSON result.

mod config;

use crate::config::{CliConfig, Command};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use msgstore_api::{ApiResponse, MessageApi};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let config = CliConfig::parse();

    if let Some(log_dir) = config.log_dir.as_deref() {
        msgstore_core::init_logging(config.resolved_log_level(), log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let db_path = config.resolved_db_path();
    let api = MessageApi::open(&db_path)
        .with_context(|| format!("failed to open message store at {}", db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        msgstore_core::core_version()
    );

    let mut out = std::io::stdout().lock();
    let ok = match config.command {
        Command::Add(payload) => {
            emit(&mut out, ApiResponse::from(api.add_message(payload.into())))?
        }
        Command::List => emit(&mut out, ApiResponse::from(api.get_messages()))?,
        Command::Get { id } => emit(&mut out, ApiResponse::from(api.get_message(&id)))?,
        Command::Update { id, payload } => {
            emit(&mut out, ApiResponse::from(api.update_message(&id, payload.into())))?
        }
        Command::Delete { id } => {
            emit(&mut out, ApiResponse::from(api.delete_message(&id)))?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Writes `response` as pretty JSON and reports whether it was `Ok`.
fn emit<T: Serialize>(out: &mut impl Write, response: ApiResponse<T>) -> Result<bool> {
    let rendered =
        serde_json::to_string_pretty(&response).context("failed to encode response")?;
    writeln!(out, "{rendered}").context("failed to write response")?;
    out.flush().context("failed to write response")?;
    Ok(response.is_ok())
}
