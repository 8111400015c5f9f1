mod reports;
mod simulation;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use omerta_game::GameConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use simulation::{GameKind, Simulator, resolve_games, run_all};
use util::{parse_seeds, split_csv};

#[derive(Debug, Parser)]
#[command(name = "omerta-tester", version = "0.1.0")]
#[command(about = "Seeded simulations of the Omerta game logic")]
struct Args {
    /// Games to simulate (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    games: String,

    /// List all available games and exit
    #[arg(long)]
    list_games: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per game and seed
    #[arg(long, default_value_t = 1_000)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_games(&args)? {
        return Ok(());
    }

    let games = resolve_games(&split_csv(&args.games)).context("parsing --games")?;
    let seeds = parse_seeds(&args.seeds).context("parsing --seeds")?;
    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let simulator = Simulator::new(GameConfig::default_config(), args.verbose);
    let results = run_all(&simulator, &games, &seeds, args.iterations);
    log::debug!("{} runs finished in {:?}", results.len(), start_time.elapsed());

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, &results)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, &results)?,
        _ => {
            reports::generate_console_report(&mut output_target, &results, start_time.elapsed())?;
        }
    }
    output_target.flush_inner()?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_games(args: &Args) -> Result<bool> {
    if !args.list_games {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available games:")?;
    for game in GameKind::ALL {
        writeln!(output_target.writer(), "  {:12} - {}", game.key(), game.description())?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎲 Omerta Simulation Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
