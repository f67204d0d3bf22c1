//! awsrands MCP server
//!
//! Serves AWS service and region availability listings over stdio.

use anyhow::Context;
use awsrands::{AwsRands, Config, McpServer};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// awsrands MCP server
#[derive(Parser, Debug)]
#[command(name = "awsrands")]
#[command(version)]
#[command(about = "MCP server for AWS service and region availability")]
struct Args {
    /// Origin the listing pages are fetched from
    #[arg(long)]
    base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::from_env().context("reading AWSRANDS_* environment")?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str())?;
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.as_str())?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs)?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries JSON-RPC frames only
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.config()?;
    tracing::info!(
        base_url = %config.base_url,
        user_agent = %config.user_agent,
        "awsrands MCP server starting"
    );

    let service = AwsRands::new(config).context("building HTTP client")?;
    Arc::new(McpServer::new(service))
        .run()
        .await
        .context("serving MCP over stdio")?;

    Ok(())
}
