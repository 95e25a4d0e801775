use clap::{Args, Parser, Subcommand};
use msgstore_core::MessagePayload;
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "msgstore.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "msgstore", about = "Persistent message record store", version)]
pub struct CliConfig {
    /// SQLite database file backing the store
    #[arg(long, env = "MSGSTORE_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging stays off when unset
    #[arg(long, env = "MSGSTORE_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error); defaults by build mode
    #[arg(long, env = "MSGSTORE_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a message
    Add(PayloadArgs),
    /// List every stored message
    List,
    /// Show one message by id
    Get {
        id: String,
    },
    /// Replace title, body and attachment URL of a message
    Update {
        id: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Delete a message and print the removed record
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct PayloadArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub body: String,

    #[arg(long = "attachment-url", default_value = "")]
    pub attachment_url: String,
}

impl From<PayloadArgs> for MessagePayload {
    fn from(value: PayloadArgs) -> Self {
        MessagePayload::new(value.title, value.body, value.attachment_url)
    }
}

impl CliConfig {
    /// Resolves the database path, falling back to the system temp dir.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn resolved_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(msgstore_core::default_log_level())
    }
}
