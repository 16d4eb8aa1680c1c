use std::sync::Arc;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    banter_channels::WebChannel,
    banter_chat::ChatService,
    banter_config::{BanterConfig, Secrets},
    banter_gateway::AppState,
    banter_providers::GeminiClient,
};

#[derive(Parser)]
#[command(name = "banter", about = "Banter — prompt-orchestration gateway")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long, global = true)]
    bind: Option<String>,

    /// Port to listen on (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server (default when no subcommand is provided).
    Gateway,
    /// Run one prompt through the pipeline and print the envelope.
    Send {
        #[arg(short, long)]
        message: String,
        /// Request the chunk-emitting path.
        #[arg(long, default_value_t = false)]
        stream: bool,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Wire config → model client → channel → orchestrator.
///
/// Any failure here (missing credential, missing persona file) aborts
/// startup before the server binds.
fn build_chat_service(config: &BanterConfig) -> anyhow::Result<Arc<ChatService>> {
    let secrets = Secrets::from_env()?;
    let persona = banter_config::load_system_instruction(&config.gemini)?;

    let llm = Arc::new(GeminiClient::new(
        secrets.gemini_api_key,
        config.gemini.clone(),
        persona,
    ));
    let channel = Arc::new(WebChannel::new());

    Ok(Arc::new(ChatService::new(
        channel,
        llm,
        config.chat.chunk_size,
    )))
}

/// Synthetic request document for the one-shot `send` command.
fn cli_request_doc(message: &str, stream: bool) -> serde_json::Value {
    serde_json::json!({
        "prompt_user": message,
        "stream": stream,
        "user_data": {
            "id": "cli",
            "browserData": {
                "userAgent": concat!("banter/", env!("CARGO_PKG_VERSION")),
                "screenResolution": "none",
                "language": "en",
                "platform": std::env::consts::OS,
            }
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "banter starting");

    let config = banter_config::discover_and_load();

    match cli.command {
        None | Some(Commands::Gateway) => {
            let chat = build_chat_service(&config)?;
            let state = AppState {
                chat,
                frontend_url: config.server.frontend_url.clone(),
            };
            let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
            let port = cli.port.unwrap_or(config.server.port);
            banter_gateway::serve(&bind, port, state).await
        },
        Some(Commands::Send { message, stream }) => {
            let chat = build_chat_service(&config)?;
            let reply = chat.process(&cli_request_doc(&message, stream)).await;
            println!("{}", serde_json::to_string_pretty(&reply.envelope)?);
            if reply.status != 200 {
                anyhow::bail!("request failed with status {}", reply.status);
            }
            Ok(())
        },
    }
}
