//! Command-line entry point: run a single tool-augmented turn.

use anyhow::Context;
use clap::Parser;
use colloquy_config::ColloquyConfig;
use colloquy_core::{AgentProfile, Orchestrator};
use colloquy_provider::OpenAiClient;
use colloquy_tools::builtins::BUILTIN_ALIASES;
use colloquy_tools::{DuckDuckGoSearch, WttrWeather, builtin_tool_registry};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "colloquy", version, about = "Tool-augmented chat completion orchestrator")]
struct Cli {
    /// Message to send to the agent.
    #[arg(required_unless_present = "list_tools")]
    message: Option<String>,

    /// Path to a JSON5 config file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model override for this invocation.
    #[arg(long)]
    model: Option<String>,

    /// System instructions for the agent.
    #[arg(long, default_value = "You are a helpful assistant.")]
    instructions: String,

    /// Tool identifier to expose; repeatable. Defaults to all built-ins.
    #[arg(long = "tool")]
    tools: Vec<String>,

    /// List the available tools and exit.
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let registry = builtin_tool_registry(
        Arc::new(DuckDuckGoSearch::new()?),
        Arc::new(WttrWeather::new()?),
    )?;

    if cli.list_tools {
        for entry in registry.catalog() {
            println!("{}: {}", entry.name, entry.description);
        }
        return Ok(());
    }

    let config = ColloquyConfig::load_layered(cli.config.as_deref())
        .context("loading configuration")?;
    config.validate().context("validating configuration")?;

    let tools = if cli.tools.is_empty() {
        BUILTIN_ALIASES
            .iter()
            .map(|(alias, _)| alias.to_string())
            .collect()
    } else {
        cli.tools.clone()
    };
    debug!("advertising tools (tools={:?})", tools);

    let mut agent = AgentProfile::new("cli", &cli.instructions).with_tools(tools);
    if let Some(model) = cli.model {
        agent = agent.with_model(model);
    }

    let provider = Arc::new(OpenAiClient::new(&config.provider)?);
    let orchestrator = Orchestrator::new(config, Arc::new(registry), provider);

    let message = cli.message.context("message is required")?;
    let reply = orchestrator.run_turn(&agent, &message, &[]).await?;
    println!("{reply}");
    Ok(())
}
