// src/main.rs
// hass-intent - classify and dispatch smart-home requests

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hass_intent::config::{AppConfig, apply_env_overrides, process_env};
use hass_intent::device::{DeviceBackend, HomeAssistantClient};
use hass_intent::dispatch::{DispatchStatus, Dispatcher};
use hass_intent::intent::{Classifier, CommandExtractor};
use hass_intent::llm::create_gateway;
use hass_intent::web::{self, state::AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hass-intent")]
#[command(about = "Classify free-text home requests with an LLM and dispatch them")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.hass-intent/config.toml)
    #[arg(short, long, global = true, env = "HASS_INTENT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify a request and print the result as JSON
    Classify { text: String },

    /// Classify and dispatch a request
    Dispatch { text: String },

    /// Extract a structured device command
    Extract { text: String },

    /// List Home Assistant device states
    Devices,

    /// Call a Home Assistant service on one entity
    CallService {
        domain: String,
        service: String,
        entity_id: String,
    },

    /// Validate configuration and print a report
    CheckConfig,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let mut config = AppConfig::load(path.map(|p| p.as_path()))?;
    apply_env_overrides(&mut config, process_env);
    Ok(config)
}

/// Load, then refuse to run with a configuration that fails validation
fn load_valid_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = load_config(path)?;
    config.ensure_valid()?;
    Ok(config)
}

fn device_backend(config: &AppConfig) -> Option<Arc<dyn DeviceBackend>> {
    config
        .home_assistant
        .as_ref()
        .map(|ha| Arc::new(HomeAssistantClient::new(ha)) as Arc<dyn DeviceBackend>)
}

fn require_devices(config: &AppConfig) -> Result<Arc<dyn DeviceBackend>> {
    device_backend(config).context(
        "Home Assistant is not configured; set HOME_ASSISTANT_BASE_URL and HOME_ASSISTANT_TOKEN",
    )
}

async fn run_server(config: AppConfig, port: Option<u16>) -> Result<()> {
    let gateway = create_gateway(&config.llm);
    let dispatcher = Arc::new(Dispatcher::new(Classifier::from_config(gateway.clone(), &config)));
    let extractor = Arc::new(CommandExtractor::from_config(gateway, &config));
    let devices = device_backend(&config);
    if devices.is_none() {
        warn!("Home Assistant not configured; /api/devices will return 503");
    }

    let app = web::create_router(AppState::new(dispatcher, extractor, devices));

    let addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("hass-intent listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.command {
        // check-config prints the full report instead of stopping at the first error
        Commands::CheckConfig => load_config(cli.config.as_ref())?,
        _ => load_valid_config(cli.config.as_ref())?,
    };

    match cli.command {
        Commands::Serve { port } => run_server(config, port).await?,

        Commands::Classify { text } => {
            let classifier = Classifier::from_config(create_gateway(&config.llm), &config);
            let classification = classifier.classify(&text).await?;
            println!("{}", serde_json::to_string_pretty(&classification)?);
        }

        Commands::Dispatch { text } => {
            let classifier = Classifier::from_config(create_gateway(&config.llm), &config);
            let outcome = Dispatcher::new(classifier).dispatch(&text).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if outcome.status == DispatchStatus::Error {
                std::process::exit(1);
            }
        }

        Commands::Extract { text } => {
            let extractor = CommandExtractor::from_config(create_gateway(&config.llm), &config);
            let command = extractor.extract(&text).await?;
            println!("{}", serde_json::to_string_pretty(&command)?);
        }

        Commands::Devices => {
            let devices = require_devices(&config)?.list_devices().await?;
            for device in devices {
                println!("{:<48} {}", device.entity_id, device.state);
            }
        }

        Commands::CallService {
            domain,
            service,
            entity_id,
        } => {
            let result = require_devices(&config)?
                .invoke_service(&domain, &service, &entity_id)
                .await?;
            match result {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => println!("{{\"status\": \"success\"}}"),
            }
        }

        Commands::CheckConfig => {
            let validation = config.validate();
            println!("{}", validation.report());
            if !validation.is_valid() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
