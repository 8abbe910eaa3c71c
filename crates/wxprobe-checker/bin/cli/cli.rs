use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use wxprobe_checker::config::{DEFAULT_API_BASE_URL, DEFAULT_BLOCK_PAGE_HOST};
use wxprobe_store::file::DEFAULT_STORE_PATH;

pub const APP_ID_ENV: &str = "WXPROBE_APP_ID";
pub const APP_SECRET_ENV: &str = "WXPROBE_APP_SECRET";
pub const STORE_BACKEND_ENV: &str = "WXPROBE_STORE";
pub const STORE_PATH_ENV: &str = "WXPROBE_STORE_PATH";
pub const REDIS_URL_ENV: &str = "WXPROBE_REDIS_URL";
pub const API_BASE_URL_ENV: &str = "WXPROBE_API_BASE_URL";
pub const BLOCK_PAGE_HOST_ENV: &str = "WXPROBE_BLOCK_PAGE_HOST";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackendArg {
    #[value(name = "memory")]
    Memory,
    #[value(name = "file")]
    File,
    #[value(name = "redis")]
    Redis,
}

impl Display for StoreBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackendArg::Memory => write!(f, "memory"),
            StoreBackendArg::File => write!(f, "file"),
            StoreBackendArg::Redis => write!(f, "redis"),
        }
    }
}

/// Check whether WeChat blocks the given URLs.
///
/// Prints one JSON object per URL to stdout.
#[derive(Debug, Parser)]
#[command(name = "wxprobe")]
pub struct CLI {
    #[arg(long, env = APP_ID_ENV)]
    pub app_id: String,

    #[arg(long, env = APP_SECRET_ENV, hide_env_values = true)]
    pub app_secret: String,

    #[arg(
        long,
        env = STORE_BACKEND_ENV,
        value_enum,
        default_value_t = StoreBackendArg::File
    )]
    pub store: StoreBackendArg,

    #[arg(long, env = STORE_PATH_ENV, default_value = DEFAULT_STORE_PATH)]
    pub store_path: PathBuf,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("store", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = API_BASE_URL_ENV, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, env = BLOCK_PAGE_HOST_ENV, default_value = DEFAULT_BLOCK_PAGE_HOST)]
    pub block_page_host: String,

    /// Include the failure cause for URLs that could not be classified.
    #[arg(long)]
    pub detailed: bool,

    /// URLs to check.
    #[arg(required = true)]
    pub urls: Vec<String>,
}
