use std::sync::Arc;

use anyhow::Result;
use console::style;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::core::catalog::CatalogStore;
use crate::core::config::RosterConfig;
use crate::core::gateway::{GatewayClient, HttpGatewayClient};
use crate::interfaces::web::{AppState, build_api_router};

pub fn print_error(msg: &str) {
    eprintln!(" {} {}", style("error:").red().bold(), msg);
}

fn print_help() {
    println!(
        "\n {} - local agent catalog with one-shot gateway import\n",
        style("roster").green().bold()
    );
    println!(" {}", style("Commands:").bold());
    println!("   {}      Start the API daemon", style("serve").cyan());
    println!("   {}       Show this help", style("help").cyan());
    println!("\n {}", style("Flags (serve):").bold());
    println!("   --api-host <host>   Bind address (overrides roster.toml)");
    println!("   --api-port <port>   Bind port (overrides roster.toml)");
    println!("   --config <path>     Path to roster.toml (default ./roster.toml)");
    println!();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ServeFlags {
    pub api_host: Option<String>,
    pub api_port: Option<u16>,
    pub config: Option<String>,
}

pub(crate) fn parse_serve_flags(args: &[String], start: usize) -> ServeFlags {
    let mut flags = ServeFlags::default();
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--api-host" => {
                if i + 1 < args.len() {
                    flags.api_host = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--api-port" => {
                if i + 1 < args.len() {
                    flags.api_port = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    flags.config = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    flags
}

pub async fn run_main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "serve" => serve(&args).await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => {
            print_error(&format!("Unknown command '{}'", other));
            print_help();
            Ok(())
        }
    }
}

async fn serve(args: &[String]) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let flags = parse_serve_flags(args, 2);
    let config_path = flags.config.unwrap_or_else(|| "roster.toml".to_string());
    let mut config = RosterConfig::load(&config_path).await?;
    if let Some(host) = flags.api_host {
        config.api_host = host;
    }
    if let Some(port) = flags.api_port {
        config.api_port = port;
    }

    let catalog = CatalogStore::open(&config.data_dir).await?;
    let gateway: Arc<dyn GatewayClient> = Arc::new(HttpGatewayClient::new(&config.gateway)?);
    info!("Catalog open at {}, gateway at {}", config.data_dir.display(), config.gateway.base_url);

    let state = AppState::new(catalog, gateway, config.api_port);
    let app = build_api_router(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("roster API running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn serve_flags_default_to_none() {
        let flags = parse_serve_flags(&args(&["roster", "serve"]), 2);
        assert_eq!(flags, ServeFlags::default());
    }

    #[test]
    fn serve_flags_parse_host_port_and_config() {
        let flags = parse_serve_flags(
            &args(&[
                "roster", "serve", "--api-port", "9000", "--api-host", "0.0.0.0", "--config",
                "/tmp/roster.toml",
            ]),
            2,
        );
        assert_eq!(flags.api_host.as_deref(), Some("0.0.0.0"));
        assert_eq!(flags.api_port, Some(9000));
        assert_eq!(flags.config.as_deref(), Some("/tmp/roster.toml"));
    }

    #[test]
    fn serve_flags_ignore_trailing_flag_without_value() {
        let flags = parse_serve_flags(&args(&["roster", "serve", "--api-port"]), 2);
        assert_eq!(flags.api_port, None);
    }

    #[test]
    fn serve_flags_skip_unknown_arguments() {
        let flags = parse_serve_flags(
            &args(&["roster", "serve", "--verbose", "--api-port", "7411"]),
            2,
        );
        assert_eq!(flags.api_port, Some(7411));
    }
}
