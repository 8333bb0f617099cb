//! Prepares source and mask images for an outpainting run.

use std::path::PathBuf;

use clap::Parser;
use outpaint::canvas::{write_outpaint_inputs, DEFAULT_CANVAS};
use outpaint::{Config, Dimensions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Center an image on a transparent canvas and save it as src.png, mask.png and sample.png.
#[derive(Parser, Debug)]
#[command(name = "outpaint-canvas")]
#[command(version, about, long_about = None)]
struct Args {
    /// Image to place in the middle of the canvas.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = DEFAULT_CANVAS.width)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = DEFAULT_CANVAS.height)]
    height: u32,

    /// Folder receiving src.png, mask.png and sample.png.
    #[arg(long, default_value = "./src", value_name = "DIR")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outpaint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = Config {
        source_dir: args.out_dir,
        ..Config::default()
    };
    let canvas = Dimensions::new(args.width, args.height);
    let written = write_outpaint_inputs(&args.input, canvas, &config).await?;

    for path in written {
        println!("Wrote {} ({canvas})", path.display());
    }
    Ok(())
}
