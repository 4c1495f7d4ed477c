use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use chat_component::ChatComponent;
use chatlens_core::constants::CONFIG_ENV_VAR;
use chatlens_core::{resolve_config_path, CoreConfig, MessagePersonalizer};
use chatlens_types::{Recipient, ResourceKey};
use snbt::Snbt;

#[derive(Parser)]
#[command(name = "chatlens")]
#[command(about = "Per-recipient item tooltip personalisation for chat messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a message and print its normalised JSON
    Decode {
        /// Message file, or `-` for stdin
        input: PathBuf,
    },
    /// Personalise a message for one recipient
    Rewrite {
        /// Message file, or `-` for stdin
        input: PathBuf,
        /// Recipient display name
        #[arg(long)]
        recipient_name: String,
        /// Recipient UUID (random if omitted)
        #[arg(long)]
        recipient_id: Option<Uuid>,
        /// YAML config file (falls back to CHATLENS_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Extra item kind to resolve, may be repeated
        #[arg(long = "item-kind")]
        item_kinds: Vec<ResourceKey>,
    },
    /// Parse an SNBT tag document and print it re-rendered
    Snbt {
        /// Tag text, e.g. `{Damage:3s}`
        text: String,
    },
}

/// Main entry point for the chatlens CLI
///
/// # Environment Variables
/// - `CHATLENS_CONFIG`: YAML config file used by `rewrite` when `--config` is not given
/// - `RUST_LOG`: log filter (default directive: `chatlens=info`)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chatlens=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { input } => {
            let bytes = read_input(&input)?;
            let component = ChatComponent::decode(&bytes)
                .with_context(|| format!("failed to decode {}", input.display()))?;
            println!("{}", ChatComponent::render(&component));
        }
        Commands::Rewrite {
            input,
            recipient_name,
            recipient_id,
            config,
            item_kinds,
        } => {
            let config_path = resolve_config_path(config, std::env::var(CONFIG_ENV_VAR).ok());
            let config = match config_path {
                Some(path) => CoreConfig::load(&path)?,
                None => CoreConfig::default(),
            }
            .with_extra_item_kinds(item_kinds);

            let recipient =
                Recipient::new(recipient_id.unwrap_or_else(Uuid::new_v4), recipient_name)?;
            tracing::info!(
                "++ Personalising message for {} ({})",
                recipient.name(),
                recipient.id()
            );

            let personalizer = MessagePersonalizer::from_config(&config);
            let bytes = read_input(&input)?;
            let output = personalizer.personalize(&bytes, &recipient);

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output)?;
            writeln!(stdout)?;
        }
        Commands::Snbt { text } => {
            let compound = Snbt::parse(&text).context("failed to parse tag")?;
            println!("{}", Snbt::render(&compound));
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    if input == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        return Ok(bytes);
    }
    std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))
}
