// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Veranda - a hotel-booking concierge service.
//!
//! This is the binary entry point for the Veranda server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Veranda - a hotel-booking concierge service.
#[derive(Parser, Debug)]
#[command(name = "veranda", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Veranda concierge server.
    Serve,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match veranda_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            veranda_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("veranda serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            match toml_render(&config) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => {
                    eprintln!("veranda config: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("veranda: use --help for available commands");
        }
    }
}

fn toml_render(config: &veranda_config::VerandaConfig) -> Result<String, String> {
    let mut redacted = config.clone();
    if redacted.gemini.api_key.is_some() {
        redacted.gemini.api_key = Some("[redacted]".to_string());
    }
    redacted.gateway.auth_tokens = redacted
        .gateway
        .auth_tokens
        .values()
        .map(|user| ("[redacted]".to_string(), user.clone()))
        .collect();
    toml::to_string_pretty(&redacted).map_err(|e| e.to_string())
}
