//! Tournament CLI
//!
//! Run matches between Isola engines and track Elo ratings.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use alphabeta_engine::{AlphaBetaEngine, SearchConfig};
use isola_core::Engine;
use random_engine::RandomEngine;
use tournament::{EloTracker, MatchConfig, MatchRunner, TournamentError, TournamentResults};
use tracing::{error, info};

fn print_usage() {
    println!("Isola Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament match <engine1> <engine2> [options]");
    println!("  tournament gauntlet <challenger> [options]");
    println!("  tournament leaderboard <ELO_FILE>");
    println!();
    println!("Engines:");
    println!("  alphabeta[:D]   - Alpha-beta search, optional depth cap D");
    println!("  random[:SEED]   - Uniformly random legal moves");
    println!();
    println!("Options:");
    println!("  --games N       Games per match (default 10)");
    println!("  --depth D       Depth handed to every engine (default 4)");
    println!("  --time MS       Time per move in milliseconds");
    println!("  --match FILE    Match settings (TOML, see MatchConfig)");
    println!("  --search FILE   Alpha-beta search settings (TOML, see SearchConfig)");
    println!("  --out FILE      Write the results as JSON");
    println!("  --elo FILE      Load, update and save Elo ratings in FILE");
    println!();
    println!("Set RUST_LOG=debug for per-move search logs.");
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[derive(Debug, Default)]
struct Options {
    positional: Vec<String>,
    games: Option<u32>,
    depth: Option<u8>,
    time_ms: Option<u64>,
    match_file: Option<PathBuf>,
    search_file: Option<PathBuf>,
    out: Option<PathBuf>,
    elo: Option<PathBuf>,
}

impl Options {
    fn parse(args: &[String]) -> Self {
        let mut opts = Options::default();
        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--games" | "-g", Some(v)) => {
                    opts.games = v.parse().ok();
                    i += 1;
                }
                ("--depth" | "-d", Some(v)) => {
                    opts.depth = v.parse().ok();
                    i += 1;
                }
                ("--time" | "-t", Some(v)) => {
                    opts.time_ms = v.parse().ok();
                    i += 1;
                }
                ("--match", Some(v)) => {
                    opts.match_file = Some(PathBuf::from(v));
                    i += 1;
                }
                ("--search", Some(v)) => {
                    opts.search_file = Some(PathBuf::from(v));
                    i += 1;
                }
                ("--out" | "-o", Some(v)) => {
                    opts.out = Some(PathBuf::from(v));
                    i += 1;
                }
                ("--elo", Some(v)) => {
                    opts.elo = Some(PathBuf::from(v));
                    i += 1;
                }
                (arg, _) if !arg.starts_with('-') => opts.positional.push(arg.to_string()),
                (arg, _) => eprintln!("Ignoring unknown option: {}", arg),
            }
            i += 1;
        }
        opts
    }

    fn match_config(&self) -> Result<MatchConfig, TournamentError> {
        let mut config = match &self.match_file {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(games) = self.games {
            config.num_games = games;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if self.time_ms.is_some() {
            config.time_per_move_ms = self.time_ms;
        }
        Ok(config)
    }

    fn search_config(&self) -> Result<SearchConfig, TournamentError> {
        match &self.search_file {
            Some(path) => Ok(SearchConfig::load(path).map_err(alphabeta_engine::EngineError::from)?),
            None => Ok(SearchConfig::default()),
        }
    }
}

fn create_engine(spec: &str, search: &SearchConfig) -> Result<Box<dyn Engine>, TournamentError> {
    let (kind, arg) = match spec.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (spec, None),
    };
    match kind.to_lowercase().as_str() {
        "alphabeta" | "ab" => {
            let mut config = search.clone();
            if let Some(arg) = arg {
                config.max_search_depth = arg
                    .parse()
                    .map_err(|_| TournamentError::UnknownEngine(spec.to_string()))?;
            }
            Ok(Box::new(AlphaBetaEngine::new(config)?))
        }
        "random" | "rand" => match arg {
            Some(seed) => seed
                .parse()
                .map(|seed| Box::new(RandomEngine::with_seed(seed)) as Box<dyn Engine>)
                .map_err(|_| TournamentError::UnknownEngine(spec.to_string())),
            None => Ok(Box::new(RandomEngine::new())),
        },
        _ => Err(TournamentError::UnknownEngine(spec.to_string())),
    }
}

fn run_match(args: &[String]) -> Result<(), TournamentError> {
    let opts = Options::parse(args);
    let [engine1_spec, engine2_spec] = opts.positional.as_slice() else {
        eprintln!("Error: match requires two engine specifications");
        print_usage();
        return Ok(());
    };

    let config = opts.match_config()?;
    let search = opts.search_config()?;

    println!("=== Match: {} vs {} ===", engine1_spec, engine2_spec);
    println!(
        "Games: {}, Depth: {}, Board: {}x{}",
        config.num_games, config.depth, config.board.rows, config.board.cols
    );
    println!();

    let mut engine1 = create_engine(engine1_spec, &search)?;
    let mut engine2 = create_engine(engine2_spec, &search)?;

    let runner = MatchRunner::new(config.clone())?;
    let result = runner.run_match(engine1.as_mut(), engine2.as_mut());

    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws ({} forfeits)",
        engine1_spec, result.wins, result.losses, result.draws, result.forfeits
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    let mut tracker = EloTracker::load_optional(opts.elo.as_deref())?;
    tracker.update_ratings(engine1_spec, engine2_spec, &result);
    println!();
    println!("{}", tracker.format_leaderboard());
    tracker.save_optional(opts.elo.as_deref())?;

    if let Some(out) = &opts.out {
        let mut results = TournamentResults::new(
            &format!("Match: {} vs {}", engine1_spec, engine2_spec),
            vec![engine1_spec.clone(), engine2_spec.clone()],
            config,
        );
        results.add_match(engine1_spec, engine2_spec, result);
        results.save(out)?;
        info!(path = %out.display(), "results written");
    }
    Ok(())
}

fn run_gauntlet(args: &[String]) -> Result<(), TournamentError> {
    let opts = Options::parse(args);
    let Some(challenger_spec) = opts.positional.first() else {
        eprintln!("Error: gauntlet requires a challenger engine");
        print_usage();
        return Ok(());
    };

    let config = opts.match_config()?;
    let search = opts.search_config()?;
    let opponents = ["random", "alphabeta:2", "alphabeta"];

    println!("=== Gauntlet: {} vs all ===", challenger_spec);
    println!("Opponents: {:?}", opponents);
    println!("Games per match: {}, Depth: {}", config.num_games, config.depth);
    println!();

    let runner = MatchRunner::new(config.clone())?;
    let mut tracker = EloTracker::load_optional(opts.elo.as_deref())?;
    let mut results = TournamentResults::new(
        &format!("Gauntlet: {}", challenger_spec),
        std::iter::once(challenger_spec.to_string())
            .chain(opponents.iter().map(|s| s.to_string()))
            .collect(),
        config,
    );

    for opponent in opponents {
        println!("\n--- {} vs {} ---", challenger_spec, opponent);

        let mut challenger = create_engine(challenger_spec, &search)?;
        let mut opp_engine = create_engine(opponent, &search)?;
        let result = runner.run_match(challenger.as_mut(), opp_engine.as_mut());

        println!(
            "Result: {}-{}-{} (Score: {:.1}%)",
            result.wins,
            result.losses,
            result.draws,
            result.score() * 100.0
        );

        tracker.update_ratings(challenger_spec, opponent, &result);
        results.add_match(challenger_spec, opponent, result);
    }

    println!();
    println!("{}", tracker.format_leaderboard());
    println!("{}", results.generate_report());
    tracker.save_optional(opts.elo.as_deref())?;
    if let Some(out) = &opts.out {
        results.save(out)?;
    }
    Ok(())
}

fn show_leaderboard(args: &[String]) -> Result<(), TournamentError> {
    let opts = Options::parse(args);
    let Some(path) = opts.elo.or_else(|| opts.positional.first().map(PathBuf::from)) else {
        eprintln!("Error: leaderboard requires an Elo file");
        print_usage();
        return Ok(());
    };
    let tracker = EloTracker::load_or_default(&path)?;
    if tracker.ratings.is_empty() {
        println!("No ratings in {}. Run matches with --elo first!", path.display());
    } else {
        println!("{}", tracker.format_leaderboard());
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let outcome = match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "gauntlet" => run_gauntlet(&args[2..]),
        "leaderboard" | "elo" => show_leaderboard(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
