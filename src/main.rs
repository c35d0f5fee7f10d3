use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use promptdiff::clipboard::Osc52Clipboard;
use promptdiff::drafts::{DraftError, open_store};
use promptdiff::llm::ProviderError;
use promptdiff::llm::config::ComparisonConfig;
use promptdiff::render::{Style, render_panel};
use promptdiff::{ComparisonSession, PromptState, Provider};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("provider setup failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("draft store unavailable: {0}")]
    Drafts(#[from] DraftError),
    #[error("failed to read prompt from stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Parser, Debug)]
#[command(name = "promptdiff", about = "Compare OpenAI and Claude responses as word diffs against your prompt")]
struct Cli {
    /// System prompt; defaults to the saved draft.
    #[arg(short, long, env = "PROMPTDIFF_SYSTEM")]
    system: Option<String>,

    /// User prompt, or `-` to read stdin; defaults to the saved draft.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Ask only one provider.
    #[arg(long)]
    only: Option<Provider>,

    /// Plain `{+added+}` / `[-removed-]` markers instead of colors.
    #[arg(long)]
    plain: bool,

    /// Copy this provider's response to the terminal clipboard (OSC 52).
    #[arg(long)]
    copy: Option<Provider>,

    /// Draft file location.
    #[arg(long, env = "PROMPTDIFF_DRAFTS")]
    drafts: Option<PathBuf>,

    /// Do not save the prompts as drafts; saved drafts are still restored.
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!(error = %e, "promptdiff failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let store = open_store(cli.drafts, cli.no_save)?;

    let mut prompt = PromptState::restore(store.as_ref());
    if let Some(system) = cli.system {
        prompt.system_prompt = system;
    }
    match cli.prompt.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            prompt.user_prompt = buf;
        }
        Some(text) => prompt.user_prompt = text.to_string(),
        None => {}
    }
    if !cli.no_save {
        prompt.persist(store.as_ref());
    }

    let config = ComparisonConfig::from_env()?;
    let session = ComparisonSession::from_config(&config)?;
    let snapshot = prompt.snapshot();

    let handles: Vec<_> = match cli.only {
        Some(provider) => vec![(provider, session.dispatch(provider, snapshot))],
        None => session.dispatch_both(&snapshot).into(),
    };
    let mut providers = Vec::with_capacity(handles.len());
    for (provider, handle) in handles {
        handle.await?;
        providers.push(provider);
    }

    let style = if cli.plain || !io::stdout().is_terminal() { Style::Plain } else { Style::Ansi };
    let panels: Vec<String> = providers
        .iter()
        .map(|&provider| render_panel(&session.view(provider), style))
        .collect();
    println!("{}", panels.join("\n"));

    if let Some(provider) = cli.copy {
        let clipboard = Osc52Clipboard::new(io::stdout());
        match session.copy_response(provider, &clipboard) {
            Ok(true) => eprintln!("Copied {} response.", provider.display_name()),
            Ok(false) => eprintln!("Nothing to copy from {}.", provider.display_name()),
            Err(e) => tracing::warn!(%provider, error = %e, "copy failed"),
        }
    }

    Ok(())
}
