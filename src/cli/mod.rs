//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "minbar")]
#[command(about = "A full-screen terminal chat client for question-answering services")]
#[command(
    long_about = "Minbar is a full-screen terminal chat client for services that answer \
questions over a minimal HTTP protocol: POST /ask with {\"question\": ...}, \
answered by {\"response\": ...}.\n\n\
Configuration:\n\
  Use 'minbar set endpoint <URL>' to point at your service, or pass\n\
  --endpoint for a single session. 'minbar config' prints current values.\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the question\n\
  Alt+Enter         Insert a new line\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+B            Select a reply to copy (j/k move, Enter copies)\n\
  Ctrl+Y            Copy the newest reply\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the question-answering service
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Write tracing diagnostics to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Print the current configuration
    Config,
    /// Set a configuration value
    Set {
        /// Configuration key to set (endpoint, theme, typing-interval-ms)
        key: String,
        /// Value to set for the key
        value: String,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.debug_log.as_deref())?;

    match args.command {
        None | Some(Commands::Chat) => run_chat(args.endpoint).await,
        Some(Commands::Config) => {
            Config::load()?.print_all();
            Ok(())
        }
        Some(Commands::Set { key, value }) => {
            let mut config = Config::load()?;
            let confirmation = config.set_value(&key, &value)?;
            config.save()?;
            println!("{confirmation}");
            Ok(())
        }
        Some(Commands::Unset { key }) => {
            let mut config = Config::load()?;
            let confirmation = config.unset_value(&key)?;
            config.save()?;
            println!("{confirmation}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn set_parses_key_and_value() {
        let args = Args::parse_from(["minbar", "set", "endpoint", "http://localhost:9000"]);
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key, "endpoint");
                assert_eq!(value, "http://localhost:9000");
            }
            _ => panic!("expected set subcommand"),
        }
    }

    #[test]
    fn endpoint_flag_is_global() {
        let args = Args::parse_from(["minbar", "--endpoint", "http://localhost:9000"]);
        assert_eq!(args.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(args.command.is_none());
    }
}
