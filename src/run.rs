//! Application run modes: logger init, markdown rendering, transcript rendering.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use chatmark::core::config::Config;
use chatmark::core::markdown::{RenderOptions, Renderer};
use chatmark::core::transcript;

use crate::cli::Args;

/// Initialize env_logger on stderr so stdout carries only HTML.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .target(env_logger::Target::Stderr)
    .try_init();
}

/// Config values with CLI flags applied on top. Flags can only switch features on.
fn renderer_for(args: &Args, config: &Config) -> Renderer {
    Renderer::new(RenderOptions {
        escape_links: args.escape_links || config.render.escape_links,
    })
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, html: &str) -> io::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html)?;
            log::info!("Wrote {} bytes to {}", html.len(), path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            if !html.is_empty() && !html.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()
        }
    }
}

/// Render a markdown file (or stdin) to HTML.
pub fn run_render(args: &Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let input = args.input.as_deref();
    let markdown = read_input(input).map_err(|e| match input {
        Some(path) if path != Path::new("-") => {
            format!("Failed to read {}: {}", path.display(), e)
        }
        _ => format!("Failed to read stdin: {}", e),
    })?;
    let renderer = renderer_for(args, config);
    let html = renderer.render_str(&markdown);
    write_output(args.output.as_deref(), &html)?;
    Ok(())
}

/// Render a JSON chat transcript to HTML.
pub fn run_transcript(
    args: &Args,
    config: &Config,
    path: &Path,
    show_system: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let messages = transcript::load(path)?;
    log::info!("Loaded {} message(s) from {}", messages.len(), path.display());
    let renderer = renderer_for(args, config);
    let html =
        transcript::render_transcript(&messages, &renderer, show_system || config.show_system);
    write_output(args.output.as_deref(), &html)?;
    Ok(())
}
