use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crossgen::render::render_puzzle;
use crossgen::words::load_dictionary;
use crossgen::{GenerateError, Generator};

/// Crossword generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file (word;clue per line)
    #[arg(default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample.dict"))]
    dictionary: PathBuf,

    /// Number of rows on the board
    #[arg(short, long, default_value_t = 15)]
    rows: usize,

    /// Number of columns on the board
    #[arg(short, long, default_value_t = 20)]
    cols: usize,

    /// Seed for the isolated-placement shuffle, for reproducible boards
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the puzzle as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let debug_enabled = std::env::var("CROSSGEN_DEBUG").is_ok();
    crossgen::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        eprintln!("Error: {}", e.display_detailed());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<(), GenerateError> {
    let cli = Cli::parse();

    let dictionary = load_dictionary(&cli.dictionary)?;
    log::debug!("loaded {} entries from {}", dictionary.len(), cli.dictionary.display());

    let generator = match cli.seed {
        Some(seed) => Generator::with_seed(dictionary, cli.rows, cli.cols, seed)?,
        None => Generator::new(dictionary, cli.rows, cli.cols)?,
    };
    let puzzle = generator.generate();

    if cli.json {
        let json = serde_json::to_string_pretty(&puzzle)
            .map_err(|e| GenerateError::Io(e.into()))?;
        println!("{json}");
    } else {
        println!("{}", render_puzzle(&puzzle));
    }

    let stats = puzzle.statistics();
    eprintln!(
        "Placed {} words ({} isolated) with {} attempts in {:.3}s.",
        puzzle.placed().len(),
        stats.isolated_placements,
        stats.attempts,
        stats.duration.as_secs_f64(),
    );
    if !puzzle.is_complete() {
        eprintln!("⚠️  {} word(s) could not be placed: {}", puzzle.unplaced().len(), puzzle.unplaced().join(", "));
    }

    Ok(())
}
