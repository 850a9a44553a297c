//! serial-epub: download a web serial's chapters and bundle them into an EPUB.

mod prompt;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use serial_core::{ChapterRange, SelectionError};
use serial_engine::{
    BuildError, BuildEvent, ConfigError, FetchSettings, ProgressSink, ReqwestFetcher,
    SerialBuilder, SiteConfig,
};
use serial_logging::{serial_error, serial_info, LogDestination};
use thiserror::Error;

use crate::prompt::{print_latest, prompt_range, PromptError};

#[derive(Parser)]
#[command(name = "serial-epub")]
#[command(version, about = "Build an EPUB from a web serial's chapters", long_about = None)]
struct Cli {
    /// Site configuration (RON). Defaults to The Wandering Inn.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// First chapter to include (one-based)
    #[arg(short, long)]
    start: Option<usize>,

    /// Last chapter to include (one-based)
    #[arg(short, long)]
    end: Option<usize>,

    /// Directory the EPUB is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Do not prompt; build every chapter unless --start/--end narrow it
    #[arg(short, long)]
    yes: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("invalid chapter range: {0}")]
    Range(#[from] SelectionError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn emit(&self, event: BuildEvent) {
        match event {
            BuildEvent::Progress {
                current,
                total,
                title,
            } => println!("Downloading chapter {current}/{total}: {title}"),
            BuildEvent::ChapterSkipped(skip) => {
                println!("  skipped {}: {}", skip.chapter.title, skip.reason)
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            serial_error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.log_file.is_some() {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    serial_logging::initialize(destination, level);
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    if cli.print_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }
    let latest_count = config.latest_chapters_count;

    let runtime = tokio::runtime::Runtime::new().map_err(AppError::Runtime)?;
    let builder = SerialBuilder::new(config, ReqwestFetcher::new(FetchSettings::default()))?
        .with_date(chrono::Local::now().format("%Y-%m-%d").to_string());

    println!("Fetching chapter list from {}", builder.config().toc_url);
    let chapters = runtime.block_on(builder.discover())?;
    if chapters.is_empty() {
        return Err(BuildError::NoChapters.into());
    }

    let mut stdout = io::stdout();
    print_latest(&mut stdout, &chapters, latest_count)?;

    let total = chapters.len();
    let range = if cli.yes || cli.start.is_some() || cli.end.is_some() {
        ChapterRange::new(cli.start.unwrap_or(1), cli.end.unwrap_or(total), total)?
    } else {
        let stdin = io::stdin();
        prompt_range(&mut stdin.lock(), &mut stdout, total)?
    };
    let selected = range.select(&chapters);
    serial_info!(
        "Selected chapters {} to {} ({} chapters)",
        range.start(),
        range.end(),
        range.count()
    );
    println!(
        "Building EPUB with chapters {} to {} ({} chapters)",
        range.start(),
        range.end(),
        range.count()
    );

    let outcome = runtime.block_on(builder.build(selected, &ConsoleProgress))?;
    let filename = builder.output_filename(selected);
    let path = builder.write(&outcome.book, &cli.output_dir, &filename)?;

    if !outcome.skipped.is_empty() {
        println!("{} chapters could not be included", outcome.skipped.len());
    }
    println!("EPUB created: {}", path.display());
    Ok(())
}
