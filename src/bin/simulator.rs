//! Snake Agents Headless Simulator
//!
//! Plays batches of seeded games with any registered agent, or trains the
//! genetic agent's weights.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --agent ID        Agent to play (default: astar)
//!   --grid N          Grid side length (default: 20)
//!   --runs N          Number of games (default: 100)
//!   --seed N          RNG seed (default: random)
//!   --max-moves N     Move cap per game (default: 20000)
//!   --config FILE     Load settings from a JSON file; flags override it
//!   --list            List agent ids and exit
//!   --train           Train genetic weights instead of simulating
//!   --generations N   Training generations
//!   --population N    Training population size
//!   --games N         Games per individual per generation
//!   --save FILE       Where to write trained weights
//!   --load FILE       Play the genetic agent with saved weights
//!   --json            Print the report as JSON
//!   --quiet           Only final summary line

use anyhow::{bail, Context, Result};
use snake_agents::agents::AGENTS;
use snake_agents::genetic::{
    default_model_path, load_model, save_model, train_with_progress, GeneticConfig, SavedModel,
};
use snake_agents::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Default)]
struct CliArgs {
    agent: Option<String>,
    grid: Option<i32>,
    runs: Option<u32>,
    seed: Option<u64>,
    max_moves: Option<u64>,
    config_path: Option<PathBuf>,
    list: bool,
    train: bool,
    generations: Option<u32>,
    population: Option<usize>,
    games: Option<u32>,
    save: Option<PathBuf>,
    load: Option<PathBuf>,
    json: bool,
    quiet: bool,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .with_context(|| format!("{flag} requires a value"))
}

fn number<T>(args: &[String], i: usize, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = value(args, i, flag)?;
    raw.parse()
        .with_context(|| format!("{flag} requires a number, got `{raw}`"))
}

fn parse_args() -> Result<CliArgs> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--agent" => {
                i += 1;
                cli.agent = Some(value(&args, i, flag)?.to_string());
            }
            "--grid" => {
                i += 1;
                cli.grid = Some(number(&args, i, flag)?);
            }
            "--runs" => {
                i += 1;
                cli.runs = Some(number(&args, i, flag)?);
            }
            "--seed" => {
                i += 1;
                cli.seed = Some(number(&args, i, flag)?);
            }
            "--max-moves" => {
                i += 1;
                cli.max_moves = Some(number(&args, i, flag)?);
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(PathBuf::from(value(&args, i, flag)?));
            }
            "--generations" => {
                i += 1;
                cli.generations = Some(number(&args, i, flag)?);
            }
            "--population" => {
                i += 1;
                cli.population = Some(number(&args, i, flag)?);
            }
            "--games" => {
                i += 1;
                cli.games = Some(number(&args, i, flag)?);
            }
            "--save" => {
                i += 1;
                cli.save = Some(PathBuf::from(value(&args, i, flag)?));
            }
            "--load" => {
                i += 1;
                cli.load = Some(PathBuf::from(value(&args, i, flag)?));
            }
            "--list" => cli.list = true,
            "--train" => cli.train = true,
            "--json" => cli.json = true,
            "--quiet" => cli.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                print_usage();
                bail!("unknown argument: {other}");
            }
        }
        i += 1;
    }
    Ok(cli)
}

fn print_usage() {
    eprintln!(
        "Snake Agents Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --agent ID        Agent to play (default: astar)\n\
         \x20 --grid N          Grid side length (default: 20)\n\
         \x20 --runs N          Number of games (default: 100)\n\
         \x20 --seed N          RNG seed (default: random)\n\
         \x20 --max-moves N     Move cap per game (default: 20000)\n\
         \x20 --config FILE     Load settings from JSON; flags override it\n\
         \x20 --list            List agent ids and exit\n\
         \x20 --train           Train genetic weights\n\
         \x20 --generations N   Training generations\n\
         \x20 --population N    Training population size\n\
         \x20 --games N         Games per individual per generation\n\
         \x20 --save FILE       Where to write trained weights\n\
         \x20 --load FILE       Play the genetic agent with saved weights\n\
         \x20 --json            Print the report as JSON\n\
         \x20 --quiet           Only final summary line\n\
         \x20 --help, -h        Show this help"
    );
}

// ── Modes ────────────────────────────────────────────────────────────

fn list_agents() {
    for info in AGENTS {
        println!("{:<22} {}", info.id, info.name);
    }
}

fn train(cli: &CliArgs) -> Result<()> {
    let mut config = match &cli.config_path {
        Some(path) => GeneticConfig::from_json_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => GeneticConfig::default(),
    };
    if let Some(grid) = cli.grid {
        config.grid_size = grid;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(max_moves) = cli.max_moves {
        config.max_moves = max_moves;
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }
    if let Some(population) = cli.population {
        config.population_size = population;
    }
    if let Some(games) = cli.games {
        config.games_per_individual = games;
    }

    if !cli.quiet {
        eprintln!(
            "Training: {} generation(s) x {} individuals x {} game(s), grid={}, seed={}",
            config.generations,
            config.population_size,
            config.games_per_individual,
            config.grid_size,
            config.seed,
        );
    }

    let quiet = cli.quiet;
    let report = train_with_progress(&config, |stats| {
        if !quiet {
            println!(
                "  Gen {:>3}: best={:>8.1} mean={:>8.1}",
                stats.generation, stats.best_fitness, stats.mean_fitness
            );
        }
    })?;

    let best = report.best;
    println!(
        "Best fitness {:.1}: food={:.3} wall={:.3} tail={:.3} space={:.3}",
        best.fitness,
        best.weights.food_distance,
        best.weights.wall_distance,
        best.weights.tail_distance,
        best.weights.space_freedom,
    );

    let path = match &cli.save {
        Some(path) => path.clone(),
        None => default_model_path()?,
    };
    save_model(&path, &SavedModel::from_best(&best, report.generations))
        .with_context(|| format!("saving {}", path.display()))?;
    if !cli.quiet {
        eprintln!("Saved weights to {}", path.display());
    }
    Ok(())
}

fn simulate(cli: &CliArgs) -> Result<()> {
    let mut config = match &cli.config_path {
        Some(path) => SimConfig::from_json_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(agent) = &cli.agent {
        config.agent = agent.clone();
    }
    if let Some(grid) = cli.grid {
        config.grid_size = grid;
    }
    if let Some(runs) = cli.runs {
        config.num_runs = runs;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(max_moves) = cli.max_moves {
        config.max_moves = max_moves;
    }
    if let Some(path) = &cli.load {
        let model = load_model(path).with_context(|| format!("loading {}", path.display()))?;
        config.agent = "genetic".to_string();
        config.weights = Some(model.weights);
    }
    if cli.quiet {
        config.verbosity = 0;
    }

    if !cli.quiet {
        eprintln!(
            "Simulating {} game(s) of {} on a {}x{} grid, seed={}",
            config.num_runs,
            config.agent,
            config.grid_size,
            config.grid_size,
            config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string()),
        );
    }

    let report = run_simulation(&config)?;
    if cli.json {
        println!("{}", report.to_json());
    } else if cli.quiet {
        println!(
            "{} avg_score={:.2} max={} wins={}/{}",
            report.agent, report.avg_score, report.max_score, report.wins, report.num_runs
        );
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = parse_args()?;
    if cli.list {
        list_agents();
        return Ok(());
    }
    if cli.train {
        train(&cli)
    } else {
        simulate(&cli)
    }
}
