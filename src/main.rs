use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use questline::commands::{progress, quests, run, show};
use questline::tick::TickKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "questline")]
#[command(about = "Resumable quest execution engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one execution pass of a quest for a player
    Run {
        /// Quest type name (defaults to the first quest)
        quest: Option<String>,

        /// Player identifier, e.g. github:1234
        #[arg(short, long)]
        player: String,

        /// What kind of tick triggered this pass
        #[arg(short, long, default_value = "triggered", value_parser = parse_tick)]
        tick: TickKind,

        /// Override the snapshot store directory
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },

    /// Show a player's progress through a quest
    Show {
        /// Quest type name (defaults to the first quest)
        quest: Option<String>,

        /// Player identifier
        #[arg(short, long)]
        player: String,

        /// Override the snapshot store directory
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },

    /// List a player's started-but-unfinished quests
    Progress {
        /// Player identifier
        #[arg(short, long)]
        player: String,

        /// Override the snapshot store directory
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },

    /// List the registered quest types
    Quests,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn parse_tick(s: &str) -> Result<TickKind, String> {
    s.parse().map_err(|err: anyhow::Error| err.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            quest,
            player,
            tick,
            store_dir,
        } => run::execute(quest, player, tick, store_dir),
        Commands::Show {
            quest,
            player,
            store_dir,
        } => show::execute(quest, player, store_dir),
        Commands::Progress { player, store_dir } => progress::execute(player, store_dir),
        Commands::Quests => quests::execute(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "questline", &mut std::io::stdout());
            Ok(())
        }
    }
}
