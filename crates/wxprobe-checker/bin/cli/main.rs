mod cli;

use crate::cli::{StoreBackendArg, CLI};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wxprobe_checker::{Checker, CheckerConfig, CredentialStore, VerificationResult};
use wxprobe_store::{FileCredentialStore, InMemoryCredentialStore, RedisCredentialStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = CLI::try_parse()?;

    info!(
        app_id = %cli.app_id,
        store_backend = %cli.store,
        urls = cli.urls.len(),
        "starting checks"
    );

    let config = CheckerConfig::builder()
        .app_id(cli.app_id)
        .app_secret(cli.app_secret)
        .api_base_url(cli.api_base_url)
        .block_page_host(cli.block_page_host)
        .build();

    match cli.store {
        StoreBackendArg::Memory => {
            run(config, InMemoryCredentialStore::new(), &cli.urls, cli.detailed).await?;
        }
        StoreBackendArg::File => {
            let store = FileCredentialStore::new(cli.store_path);
            run(config, store, &cli.urls, cli.detailed).await?;
        }
        StoreBackendArg::Redis => {
            let redis_url = cli
                .redis_url
                .ok_or("redis url is required when store backend is redis")?;
            let store = RedisCredentialStore::connect(&redis_url).await?;
            run(config, store, &cli.urls, cli.detailed).await?;
        }
    }

    Ok(())
}

async fn run<S: CredentialStore>(
    config: CheckerConfig,
    store: S,
    urls: &[String],
    detailed: bool,
) -> Result<(), reqwest::Error> {
    let checker = Checker::new(config, store)?;

    for url in urls {
        let line = match checker.check_detailed(url).await {
            VerificationResult::Indeterminate(cause) if detailed => {
                json!({ "url": url, "result": null, "error": cause.to_string() })
            }
            result => match result.into_response() {
                Some(response) => json!({ "url": url, "code": response.code, "msg": response.msg }),
                None => json!({ "url": url, "result": null }),
            },
        };
        println!("{line}");
    }

    Ok(())
}
