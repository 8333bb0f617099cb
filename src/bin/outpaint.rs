//! Interactive outpainting tool.
//!
//! Reads `OPENAI_API_KEY` from the environment, then asks before every run.

use clap::Parser;
use outpaint::{Config, OpenAiEditor, Pipeline, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "outpaint")]
#[command(about = "Send ./src/src.png and ./src/mask.png to the OpenAI image-edit API on demand")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("outpaint={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env();
    // An empty key is accepted here so every run reports it through validation.
    let editor = OpenAiEditor::builder()
        .api_key(config.api_key.clone())
        .build()?;
    let pipeline = Pipeline::new(config, editor);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = Session::new(stdin, tokio::io::stdout());
    let runs = session.run(&pipeline).await?;

    tracing::debug!(runs, "session ended");
    Ok(())
}
