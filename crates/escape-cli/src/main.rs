//! Escape-room puzzle solver
//!
//! Command-line front end for `escape-core`: classify and solve puzzle
//! text, print tiered hints, or answer JSON requests.

mod error;

use clap::{ArgAction, Parser, Subcommand};
use escape_core::{
    default_strategies, parse_key_entry, Coordinator, CoordinatorConfig, HintLevel, HintService,
    PuzzleAnalysis, SolveContext, SolveRequest,
};
use error::Result;
use log::{info, LevelFilter};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

/// Classifies and solves escape-room puzzles, with progressive hints.
#[derive(Parser)]
#[command(name = "escape-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only attempt strongly signalled puzzle types
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print the analysis.
    Solve(SolveArgs),
    /// Print the plausible puzzle types with their scores.
    Classify {
        /// Puzzle text
        text: String,
    },
    /// Answer a JSON request read from a file or stdin.
    Request {
        /// Request file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// List the registered strategies.
    Strategies,
}

#[derive(clap::Args)]
struct SolveArgs {
    /// Puzzle text
    text: String,

    /// Where the puzzle was found
    #[arg(long)]
    context: Option<String>,

    /// Hint tier to print: hint, nudge or full
    #[arg(long, default_value = "hint")]
    hint_level: HintLevel,

    /// Print the hint for this attempt number instead of --hint-level
    #[arg(long)]
    attempt: Option<u32>,

    /// Known Caesar shift
    #[arg(long)]
    shift: Option<u8>,

    /// Number of wheels on the lock
    #[arg(long)]
    lock_width: Option<usize>,

    /// Ordered clue phrase (repeatable)
    #[arg(long = "clue")]
    clues: Vec<String>,

    /// Substitution key entry CIPHER=PLAIN (repeatable)
    #[arg(long = "key")]
    keys: Vec<String>,

    /// Known answer (math, riddle, anagram)
    #[arg(long)]
    answer: Option<String>,

    /// Letters on a word lock
    #[arg(long)]
    word_length: Option<usize>,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,
}

impl SolveArgs {
    fn context(&self) -> Result<SolveContext> {
        let mut ctx = SolveContext::new().with_clues(self.clues.iter().cloned());
        if let Some(note) = &self.context {
            ctx = ctx.with_note(note.clone());
        }
        if let Some(shift) = self.shift {
            ctx = ctx.with_shift(shift);
        }
        if let Some(width) = self.lock_width {
            ctx = ctx.with_lock_width(width);
        }
        if let Some(answer) = &self.answer {
            ctx = ctx.with_known_answer(answer.clone());
        }
        if let Some(len) = self.word_length {
            ctx = ctx.with_word_length(len);
        }
        if !self.keys.is_empty() {
            let key = self
                .keys
                .iter()
                .map(|entry| parse_key_entry(entry))
                .collect::<std::result::Result<BTreeMap<char, char>, _>>()?;
            ctx = ctx.with_substitution_key(key);
        }
        Ok(ctx)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = if cli.strict {
        CoordinatorConfig::strict()
    } else {
        CoordinatorConfig::default()
    };
    let coordinator = Coordinator::with_config(config);

    let result = match cli.command {
        Command::Solve(args) => run_solve(&coordinator, &args),
        Command::Classify { text } => {
            run_classify(&coordinator, &text);
            Ok(())
        }
        Command::Request { file } => run_request(&coordinator, file),
        Command::Strategies => {
            run_strategies();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be installed when embedded; keep going without one.
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}

// ==================== Commands ====================

fn run_solve(coordinator: &Coordinator, args: &SolveArgs) -> Result<()> {
    let ctx = args.context()?;
    let analysis = coordinator.solve(&args.text, &ctx);
    info!(
        "{} type(s), {} candidate(s)",
        analysis.puzzle_types.len(),
        analysis.solutions.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let service = HintService::new();
    let (level, hint) = match args.attempt {
        Some(n) => (HintLevel::for_attempt(n), service.progressive_hint(&analysis, n)),
        None => (args.hint_level, service.hint_at(&analysis, args.hint_level)),
    };
    print_analysis(&analysis, ctx.note.as_deref());
    println!();
    println!("{}:", level);
    println!("{}", hint);
    if service.has_more(level) {
        if let Some(next) = service.next_level(level) {
            println!("(more available: --hint-level {})", next);
        }
    }
    Ok(())
}

fn print_analysis(analysis: &PuzzleAnalysis, note: Option<&str>) {
    println!("{}", analysis.summary(note));

    if !analysis.identified_objects.is_empty() {
        println!();
        println!("Objects:");
        for object in &analysis.identified_objects {
            println!("  {} ({}): {}", object.label, object.category, object.details);
        }
    }

    println!();
    match analysis.primary() {
        Some(primary) => {
            println!(
                "Answer: {}  [{}, {}% confidence]",
                primary.final_answer, primary.label, primary.confidence
            );
            for alt in &analysis.alternative_interpretations {
                println!("  or {} ({}%)", alt.description, alt.confidence);
            }
        }
        None => println!("No solution found."),
    }

    if let Some(prediction) = &analysis.next_puzzle_prediction {
        println!();
        println!("Next: {}", prediction);
    }
}

fn run_classify(coordinator: &Coordinator, text: &str) {
    let classifier = escape_core::Classifier::with_min_plausibility(
        coordinator.config().min_plausibility,
    );
    let scores = classifier.scored(text);
    if scores.is_empty() {
        println!("No plausible puzzle type.");
    }
    for p in scores {
        println!("{:<10} {:>3}  {}", p.puzzle_type.name(), p.score, p.signals.join(", "));
    }
}

fn run_request(coordinator: &Coordinator, file: Option<PathBuf>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request: SolveRequest = serde_json::from_str(&raw)?;
    let response = coordinator.handle(&request);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_strategies() {
    for strategy in default_strategies() {
        println!(
            "{:<18} {:<10} {}",
            strategy.name(),
            strategy.puzzle_type().name(),
            strategy.difficulty()
        );
        for hint in strategy.hints() {
            println!("    - {}", hint);
        }
    }
}
