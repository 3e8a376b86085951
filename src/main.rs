//! AI Diet & Fitness Coach
//!
//! An MCP server for meal, workout, and hydration tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

mod build_info;
mod estimation;
mod mcp;
mod models;
mod session;
mod targets;
mod tools;

use estimation::GeminiEstimator;
use mcp::CoachService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dietcoach=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // The API key is the only required configuration; missing key is fatal
    let estimator = GeminiEstimator::from_env()?;

    // Create the coach service with a fresh session
    let service = CoachService::new(Arc::new(estimator));

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
