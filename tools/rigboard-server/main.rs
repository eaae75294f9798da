use anyhow::Result;
use clap::Parser;
use rigboard::codegen::IndentStrategy;
use rigboard::config::{Config, LogFormat};
use rigboard::{logging, server};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "rigboard-server")]
#[command(version, about = "Canvas code-generation backend and storefront demo")]
struct Cli {
    /// Configuration file path (TOML or JSON)
    #[arg(short, long, env = "RIGBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP bind address
    #[arg(long, env = "RIGBOARD_HTTP_BIND")]
    http_bind: Option<SocketAddr>,

    /// Port to bind on all interfaces; ignored when --http-bind is given
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// SQLite database file for rigs and connections
    #[arg(long, env = "RIGBOARD_DATABASE")]
    database: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "RIGBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long, env = "RIGBOARD_LOG_JSON")]
    log_json: bool,

    /// Default language for code generation
    #[arg(long, env = "RIGBOARD_LANGUAGE")]
    language: Option<String>,

    /// Default indentation strategy (structured or successor)
    #[arg(long, env = "RIGBOARD_INDENT")]
    indent: Option<IndentStrategy>,

    /// Seconds an idle storefront session is kept
    #[arg(long, env = "RIGBOARD_SESSION_TTL")]
    session_ttl: Option<u64>,
}

/// Load configuration from an optional file, then apply CLI and environment overrides
fn load_config(cli: Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(http_bind) = cli.http_bind {
        config.http_bind = http_bind;
    } else if let Some(port) = cli.port {
        config.http_bind.set_port(port);
    }
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if cli.log_json {
        config.log_format = LogFormat::Json;
    }
    if let Some(language) = cli.language {
        config.default_language = language;
    }
    if let Some(indent) = cli.indent {
        config.indent_strategy = indent;
    }
    if let Some(session_ttl) = cli.session_ttl {
        config.session_ttl_secs = session_ttl;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(Cli::parse())?;
    logging::init(&config)?;
    logging::log_config(&config);

    server::run_server(Arc::new(config)).await
}
