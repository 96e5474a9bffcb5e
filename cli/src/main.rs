//! askback: collect human feedback (text and images) for an automated
//! agent, through a terminal prompt or a desktop form, and report the
//! collected items on stdout.

mod output;
mod prompt;

use std::io::IsTerminal as _;

use anyhow::Result;
use askback_core::{FeedbackItem, ItemKind, SENTINELS, collect_text_feedback};
use askback_input::ReaderLineSource;
use askback_ui::{DisplayCapability, FrontendOptions};
use clap::{Parser, Subcommand};

use crate::output::Output;
use crate::prompt::PromptLineSource;

#[derive(Parser)]
#[command(name = "askback")]
#[command(about = "Collect human feedback for an automated agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Agent work summary shown to the human
    #[arg(long, short = 's', global = true, default_value = "")]
    summary: String,

    /// Timeout in seconds. Accepted for compatibility; collection is never
    /// preempted while a human is answering.
    #[arg(long, short = 't', global = true, default_value = "6000")]
    timeout: u64,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect feedback through a line-based terminal prompt
    Text,
    /// Collect feedback through a desktop form (degrades to the terminal
    /// prompt when no display is available)
    Visual,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        // Native clipboard backends log errors for every non-text clipboard
        // read; that noise is expected here and must not reach the agent.
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .filter_module("arboard", log::LevelFilter::Error)
        .init();
}

fn collect_text(summary: &str, out: &Output) -> Vec<FeedbackItem> {
    if !summary.is_empty() {
        out.header(format!("📋 {summary}"));
    }
    out.print(format!("💬 Feedback ({} to finish):", SENTINELS.join("/")));

    if std::io::stdin().is_terminal() {
        let mut source = PromptLineSource::new("›");
        collect_text_feedback(&mut source)
    } else {
        let mut source = ReaderLineSource::new(std::io::stdin());
        collect_text_feedback(&mut source)
    }
}

fn collect_visual(opts: &FrontendOptions, out: &Output) -> Vec<FeedbackItem> {
    let capability = DisplayCapability::detect();
    if !capability.is_available() {
        log::debug!("no display server detected, using the terminal prompt");
        return collect_text(&opts.summary, out);
    }
    match askback_ui::run_visual(opts) {
        Ok(items) => items,
        Err(e) => {
            // Missing windowing/image libraries are an environment problem,
            // not the human's: degrade silently to the terminal prompt.
            log::debug!("visual front-end unavailable ({e}), using the terminal prompt");
            collect_text(&opts.summary, out)
        }
    }
}

fn print_report(items: &[FeedbackItem], out: &Output) {
    out.newline();
    if items.is_empty() {
        out.warning("No feedback received.");
        out.newline();
        return;
    }
    out.divider(60);
    out.header("📬 Feedback received:");
    out.divider(60);
    for item in items {
        match item.kind {
            ItemKind::Text => out.text_item(&item.content),
            ItemKind::Image => out.image_item(&item.content),
        }
    }
    out.divider(60);
    out.newline();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let out = Output::new();
    let opts = FrontendOptions {
        summary: cli.summary.clone(),
        timeout_secs: cli.timeout,
    };

    let items = match cli.command {
        Commands::Text => collect_text(&opts.summary, &out),
        Commands::Visual => collect_visual(&opts, &out),
    };

    print_report(&items, &out);
    Ok(())
}
