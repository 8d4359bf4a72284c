use std::{
    io::{self, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use tonegraph::prelude::*;

const TONEGRAPH_CONFIG: &str = "TONEGRAPH_CONFIG";
const DEFAULT_TONEGRAPH_CONFIG: &str = "tonegraph.toml";

fn main() -> ExitCode {
    init_logging();

    let Some(midi_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: tonegraph <file.mid>");
        return ExitCode::FAILURE;
    };

    match run(&midi_path) {
        Ok(report) => {
            info!(
                "Rendered {} notes in {} batches, drive t from 0 to {:.2} to play",
                report.summary.notes, report.batches, report.duration
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(midi_path: &Path) -> Result<Report> {
    let config = init_config()?;
    let pipeline = Pipeline::new(config);

    let stdout = io::stdout().lock();
    let mut session = Session::new(WriterRenderer::new(BufWriter::new(stdout)));
    pipeline.run(midi_path, &mut session)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn init_config() -> Result<Config> {
    match std::env::var(TONEGRAPH_CONFIG) {
        Ok(path) => {
            info!("Loading configuration from {path} ...");
            let config = Config::from_file(&path)?;
            debug!("{config:#?}");
            Ok(config)
        }
        Err(_) if Path::new(DEFAULT_TONEGRAPH_CONFIG).exists() => {
            info!("Loading configuration from {DEFAULT_TONEGRAPH_CONFIG} ...");
            Ok(Config::from_file(DEFAULT_TONEGRAPH_CONFIG)?)
        }
        Err(_) => {
            debug!("No configuration file, using defaults");
            Ok(Config::default())
        }
    }
}
