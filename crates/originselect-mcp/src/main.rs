use anyhow::Context;
use clap::{Parser, Subcommand};
use originselect_discovery::DiscoveryClient;
use originselect_mcp::{serve_stdio, ToolRegistry};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "originselect-mcp")]
#[command(about = "OriginSelect product discovery MCP server")]
struct Cli {
    /// Overrides `API_BASE_URL`.
    #[arg(long, global = true, value_name = "URL")]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the MCP server on stdio (default).
    Serve,
    /// Print the tool descriptors as JSON.
    Tools,
    /// Invoke one tool and print its payload.
    Call {
        name: String,
        /// Tool arguments as a JSON object.
        #[arg(default_value = "{}")]
        arguments: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = originselect_core::load_app_config()?;
    if let Some(url) = cli.api_base_url.as_deref() {
        config = config.with_api_base_url(url)?;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let client = DiscoveryClient::new(&config.api_base_url)?;
    tracing::debug!(api_base_url = %config.api_base_url, "discovery client ready");
    let registry = ToolRegistry::new(client);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve_stdio(registry).await?,
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.list())?);
        }
        Commands::Call { name, arguments } => {
            let arguments: serde_json::Value = serde_json::from_str(&arguments)
                .with_context(|| format!("arguments for {name} are not valid JSON"))?;
            let outcome = registry.invoke(&name, Some(arguments)).await;
            println!("{}", outcome.to_text());
            if outcome.is_error {
                anyhow::bail!("tool call failed: {name}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
