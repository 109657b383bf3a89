use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sketchpad::config::{EngineMode, RuntimeConfig};
use sketchpad::loader::PrimaryLoader;
use sketchpad::replay::{MIN_FRAMES, ReplayError, ReplayViewport, replay};
use sketchpad::script::{ScriptError, read_script};
use sketchpad::surface::HeadlessSurface;
use sketchpad::worker::{Init, spawn_worker};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot open script {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("snapshot encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Run a drawing script through the scene engine and print the final snapshot")]
struct Cli {
    /// JSON Lines script of commands and pointer events; stdin when omitted.
    #[arg(long, env = "SKETCHPAD_SCRIPT")]
    script: Option<PathBuf>,

    #[arg(long, env = "SKETCHPAD_WIDTH", default_value_t = 800.0)]
    width: f64,

    #[arg(long, env = "SKETCHPAD_HEIGHT", default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio of the render target.
    #[arg(long, env = "SKETCHPAD_DPR", default_value_t = 1.0)]
    dpr: f64,

    #[arg(long, env = "SKETCHPAD_ZOOM", default_value_t = 1.0)]
    zoom: f64,

    /// Frames to wait for after the script is sent.
    #[arg(long, env = "SKETCHPAD_FRAMES", default_value_t = MIN_FRAMES)]
    frames: u32,

    #[arg(long, value_enum, env = "SKETCHPAD_ENGINE", default_value_t = EngineMode::Auto)]
    engine: EngineMode,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(snapshot) => {
            println!("{snapshot}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "sketchpad failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let messages = match &cli.script {
        Some(path) => {
            let file = File::open(path).map_err(|source| CliError::Open { path: path.clone(), source })?;
            read_script(BufReader::new(file))?
        }
        None => read_script(io::stdin().lock())?,
    };
    info!(messages = messages.len(), engine = ?cli.engine, "script loaded");

    let config = RuntimeConfig::from_env();
    let init = Init { surface: Box::new(HeadlessSurface::new()), dpr: cli.dpr };
    let mut handle = spawn_worker(Box::new(PrimaryLoader::new(cli.engine)), init, config);

    let viewport = ReplayViewport { width: cli.width, height: cli.height, zoom: cli.zoom };
    let snapshot = replay(&mut handle.port, viewport, messages, cli.frames).await;
    handle.shutdown().await;
    Ok(serde_json::to_string_pretty(&snapshot?)?)
}
