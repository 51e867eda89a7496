use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Webhook backend for the word list voice assistant
#[derive(Debug, Parser)]
#[command(name = "wordlist", version)]
pub struct Args {
    /// Address the webhook listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Directory holding configuration records, one `<id>.json` per record
    #[arg(long, env = "CONFIG_DIR", default_value = "./config")]
    pub config_dir: PathBuf,

    /// JSON file persisting word records. Words are kept in memory only when unset.
    #[arg(long, env = "WORDS_FILE")]
    pub data_file: Option<PathBuf>,

    /// Root directory of blob storage buckets
    #[arg(long, env = "BLOB_ROOT", default_value = "./blobs")]
    pub blob_root: PathBuf,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
