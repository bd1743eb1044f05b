use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sboard::BoardError;
use sboard::config::BoardConfig;
use sboard::engine::EngineCore;
use sboard::export::write_export;
use sboard::formation::{FormationId, Team, instantiate};
use sboard::script;

#[derive(Parser, Debug)]
#[command(name = "sboard", about = "Headless football tactics board")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a command script to a fresh board and export the result.
    Run(RunArgs),
    /// Print the default board export.
    Default(OutputArgs),
    /// List catalog formations with jersey numbers and positions.
    Formations {
        /// Show positions mirrored for the away side.
        #[arg(long, default_value_t = false)]
        away: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, env = "SBOARD_SCRIPT", default_value = "-", help = "Script file path, or - for stdin")]
    script: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long, help = "Write the export to this file instead of stdout")]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Write the export to SBOARD_EXPORT_PATH")]
    save: bool,
}

fn main() -> Result<(), BoardError> {
    let config = BoardConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_script(&config, &args),
        Command::Default(output) => emit(&config, &EngineCore::with_config(&config), &output),
        Command::Formations { away } => {
            list_formations(if away { Team::B } else { Team::A });
            Ok(())
        }
    }
}

fn run_script(config: &BoardConfig, args: &RunArgs) -> Result<(), BoardError> {
    let text = read_input(&args.script)?;
    let commands = script::parse_script(&text)?;
    let mut engine = EngineCore::with_config(config);
    script::run(&mut engine, &commands);
    tracing::info!(
        commands = commands.len(),
        players = engine.store.players().len(),
        lines = engine.store.lines().len(),
        undo_depth = engine.store.history().past_len(),
        "script applied"
    );
    emit(config, &engine, &args.output)
}

fn read_input(source: &str) -> Result<String, BoardError> {
    if source == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(fs::read_to_string(Path::new(source))?)
}

fn emit(config: &BoardConfig, engine: &EngineCore, output: &OutputArgs) -> Result<(), BoardError> {
    let json = engine.store.export_json()?;
    let target = match (&output.out, output.save) {
        (Some(path), _) => Some(path.as_path()),
        (None, true) => Some(config.export_path.as_path()),
        (None, false) => None,
    };
    match target {
        Some(path) => write_export(path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn list_formations(team: Team) {
    for formation in FormationId::ALL {
        let slots = instantiate(team, formation)
            .iter()
            .map(|p| format!("{}:({},{})", p.number, p.x_pct, p.y_pct))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{formation}\t{slots}");
    }
}
