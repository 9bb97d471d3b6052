//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  chatmark reply.md                     Render a markdown file to stdout
  echo '**hi**' | chatmark              Render stdin
  chatmark reply.md -o reply.html       Write HTML to a file
  chatmark --escape-links untrusted.md  Escape link labels and URLs
  chatmark transcript session.json      Render a JSON chat transcript
  chatmark completions bash             Generate bash completions

ENVIRONMENT:
  CHATMARK_ESCAPE_LINKS   Same as --escape-links (1/0, true/false)
  CHATMARK_SHOW_SYSTEM    Same as transcript --show-system
  RUST_LOG                Log filter (overrides -v/-q)
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render chat-flavored markdown to HTML",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Markdown file to render ('-' or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short = 'o', long, global = true)]
    pub output: Option<PathBuf>,

    /// Escape link labels and URLs (by default they are inserted verbatim)
    #[arg(long, global = true)]
    pub escape_links: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON chat transcript, one <div> per message
    Transcript {
        /// Transcript file: a JSON array of {role, content} or an object with "messages"
        path: PathBuf,
        /// Include system messages
        #[arg(long)]
        show_system: bool,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
