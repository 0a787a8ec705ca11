use anyhow::Result;
use clap::{Arg, Command};
use quarry_mcp::{ServerConfig, run_server};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // The MCP protocol owns stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("quarry-mcp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Quarry retrieval MCP server")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to the index configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Project root to index, overriding the configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();

    let mut config = ServerConfig::default();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        config.config_path = path.clone();
    }
    if let Some(root) = matches.get_one::<PathBuf>("root") {
        config.root_override = Some(root.clone());
    }

    run_server(config).await
}
