//! # chatmark - chat markdown to HTML
//!
//! Command-line front end for the `chatmark` library.
//!
//! ## Features
//! - Render a markdown file or stdin to HTML
//! - Render a JSON chat transcript, one block per message
//! - Shell completions

mod cli;
mod run;

use std::io;

use clap::{CommandFactory, Parser};

use chatmark::core::{app, config};
use cli::{Args, Commands};

fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);
    log::debug!("{} {}", app::NAME, app::VERSION);

    // Print user-friendly message; exit uses Display not Debug
    let config = config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = match &args.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, app::NAME, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Transcript { path, show_system }) => {
            run::run_transcript(&args, &config, path, *show_system)
        }
        None => run::run_render(&args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
