// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Articulate: voice-driven squad commands.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use articulate::commands::{catalog, ActionDispatcher, CommandRegistry};
use articulate::config::Config;
use articulate::events::{EventProcessor, RecognitionEvent};
use articulate::grammar::{Grammar, COMMAND_FIELD, DIRECT_OBJECT_FIELD, SUBJECT_FIELD};
use articulate::input::{self, KeyEmulator};
use articulate::semantics::SemanticResult;
use articulate::state::AppState;

#[derive(Parser)]
#[command(name = "articulate")]
#[command(version, about = "Voice-driven squad commands")]
struct Cli {
    /// Configuration file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Input backend, overriding the configuration.
    #[arg(long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the recognition grammar as SRGS XML.
    Grammar,
    /// Dispatch utterances read line by line from stdin.
    Listen {
        /// Read JSON semantic results instead of utterances.
        #[arg(long)]
        json: bool,
    },
    /// Send the keys of one command.
    Keys {
        /// Command id, e.g. ADVANCE.
        command: String,
        /// Direct object tag, e.g. NORTH.
        direct_object: Option<String>,
        /// Subject tags, e.g. ONE.
        #[arg(short, long)]
        subject: Vec<String>,
        /// Seconds to wait before sending.
        #[arg(long, default_value_t = 3)]
        countdown: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("articulate=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(backend) = cli.backend {
        config.input.prefer_backend = backend;
    }
    info!("Configuration loaded");

    let (grammar, registry) = catalog::assemble(&config.grammar.culture, config.grammar.max_subjects)
        .context("Failed to assemble command grammar")?;

    match cli.command {
        Commands::Grammar => {
            print!("{}", grammar.to_srgs());
            Ok(())
        }
        Commands::Listen { json } => listen(&config, grammar, registry, json).await,
        Commands::Keys {
            command,
            direct_object,
            subject,
            countdown,
        } => {
            send_keys(
                &config,
                registry,
                &command,
                direct_object.as_deref(),
                &subject,
                Duration::from_secs(countdown),
            )
            .await
        }
    }
}

fn dispatcher(config: &Config, registry: CommandRegistry) -> Result<ActionDispatcher> {
    let injector = input::create_injector_with_preference(&config.input.prefer_backend)?;
    info!("Input injector: {}", injector.backend_name());

    let emulator = KeyEmulator::spawn(injector);
    Ok(ActionDispatcher::new(
        Arc::new(registry),
        emulator,
        config.key_press_delay(),
    ))
}

async fn listen(config: &Config, grammar: Grammar, registry: CommandRegistry, json: bool) -> Result<()> {
    let dispatcher = dispatcher(config, registry)?;
    let state = AppState::with_listening(config.recognition.start_listening);
    let processor = EventProcessor::new(Arc::new(grammar), dispatcher, state);

    info!(
        "Ready. Reading {} from stdin (/listen, /mute to toggle)",
        if json { "semantic results" } else { "utterances" }
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_sequence = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let event = match line {
                    "/listen" => RecognitionEvent::SetListening(true),
                    "/mute" => RecognitionEvent::SetListening(false),
                    _ if json => match SemanticResult::from_json(line) {
                        Ok(result) => RecognitionEvent::Recognized(result),
                        Err(e) => {
                            warn!("Ignoring malformed semantic result: {}", e);
                            continue;
                        }
                    },
                    _ => RecognitionEvent::Utterance(line.to_string()),
                };

                match processor.process_event(event) {
                    Ok(Some(completion)) => {
                        last_sequence = Some(tokio::spawn(async move {
                            if let Err(e) = completion.wait().await {
                                error!("Failed to send command keys: {}", e);
                            }
                        }));
                    }
                    Ok(None) => {}
                    Err(e) => error!("Error processing event: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    // Sequences run in order, so the last one finishing means all did.
    if let Some(handle) = last_sequence {
        let _ = handle.await;
    }

    info!("Articulate stopped");
    Ok(())
}

async fn send_keys(
    config: &Config,
    registry: CommandRegistry,
    command: &str,
    direct_object: Option<&str>,
    subjects: &[String],
    countdown: Duration,
) -> Result<()> {
    if !registry.contains(command) {
        bail!("Unknown command '{}'", command);
    }

    let mut result = SemanticResult::new();
    result.insert(COMMAND_FIELD, command);
    if let Some(direct_object) = direct_object {
        result.insert(DIRECT_OBJECT_FIELD, direct_object);
    }
    if !subjects.is_empty() {
        result.insert(SUBJECT_FIELD, subjects.join(" "));
    }

    let dispatcher = dispatcher(config, registry)?;
    let operations = dispatcher.resolve(&result);
    println!("Resolved {} key operations for {}", operations.len(), command);

    println!("You have {} seconds to focus the game window...", countdown.as_secs());
    tokio::time::sleep(countdown).await;

    dispatcher.execute(&result).await?;
    println!("Done!");

    Ok(())
}
