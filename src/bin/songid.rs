use clap::Parser;
use std::path::PathBuf;
use std::process;

use songid::dependency::check_for_songrec;
use songid::{Config, Songid};

#[derive(Parser)]
#[command(name = "songid")]
#[command(about = "Identify a song with songrec and rename it (and its .CDG file) to \"Artist - Title\"")]
#[command(version)]
struct Args {
    /// Directory containing the audio file
    directory: PathBuf,

    /// Audio file to identify, relative to DIRECTORY
    filename: PathBuf,

    /// Defaults file (default: ~/.state/songid/defaults.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> songid::Result<()> {
    let settings = Config::load(args.config.as_deref())?.resolve();
    settings.log();

    let songid = Songid::from_settings(&settings);
    check_for_songrec(songid.recognizer().program())?;

    songid.process_file(&args.directory, &args.filename)?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
