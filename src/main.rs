use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use yrstats_rs::aggregate::{self, parse_since_time};
use yrstats_rs::config::{Config, GameFamily};
use yrstats_rs::error::{Error, Result};
use yrstats_rs::process_stats_dump;
use yrstats_rs::stats::ClassifyOptions;

/// Parse Red Alert 2 / Yuri's Revenge stats.dmp files into JSON game reports.
#[derive(Debug, Parser)]
#[command(name = "yrstats", version)]
struct Cli {
    /// TOML file providing defaults for the options below.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode one stats.dmp and stage it with its JSON reports
    Parse {
        /// Path to the stats.dmp file written at the end of a match.
        stats_file: PathBuf,

        /// Name of the reporting player.
        #[arg(short, long)]
        player: Option<String>,

        /// Folder that receives the per-game artifact folders.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Engine family of the dump (ra, ts, yr). For ra, QUIT only marks the
        /// game unfinished and does not flag the reporting player as quit.
        #[arg(short, long, value_enum)]
        game: Option<GameFamily>,
    },

    /// Sum the parsed games staged after a cutoff into a session or overall report
    Aggregate {
        /// Folder holding the staged game folders.
        #[arg(short, long)]
        games: Option<PathBuf>,

        /// Folder that receives the report.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        since_today: bool,

        #[arg(long)]
        since_last_n_days: Option<u32>,

        /// Local time, `YYYY-MM-DD[ HH:MM:SS]`.
        #[arg(long, value_parser = parse_since_time)]
        since_time: Option<NaiveDateTime>,

        /// Write overall_stats.json instead of a session report.
        #[arg(long)]
        overall: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yrstats_rs=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Parse {
            stats_file,
            player,
            output,
            game,
        } => {
            let options = ClassifyOptions {
                player_name: player
                    .or(config.player_name)
                    .ok_or(Error::MissingPlayerName)?,
                game: game.unwrap_or(config.game),
            };
            let output_folder = output
                .or(config.output_folder)
                .unwrap_or_else(|| PathBuf::from("."));

            tracing::info!(
                player = %options.player_name,
                stats_file = %stats_file.display(),
                output_folder = %output_folder.display(),
                "parsing stats dump"
            );
            let artifacts = process_stats_dump(&stats_file, &output_folder, &options)?;

            println!("stats_dmp: {}", artifacts.stats_dump.display());
            println!("stats_parsed: {}", artifacts.stats_parsed.display());
            println!("stats_raw: {}", artifacts.stats_raw.display());
        }
        Command::Aggregate {
            games,
            output,
            since_today,
            since_last_n_days,
            since_time,
            overall,
        } => {
            let cutoff = aggregate::since_cutoff(
                Local::now().date_naive(),
                since_today,
                since_last_n_days,
                since_time,
            )
            .ok_or(Error::MissingSince)?;
            let since = aggregate::local_cutoff(cutoff);
            let games_folder = games
                .or(config.output_folder)
                .unwrap_or_else(|| PathBuf::from("."));

            let (mut stats, processed) =
                aggregate::aggregate_folder(&games_folder, &since, &config.player_aliases)?;
            if processed.is_empty() {
                tracing::info!(since = %since, "no parsed games after cutoff");
                return Ok(());
            }

            let report = if overall {
                stats.clear_relative_start_times();
                let folder = output
                    .or(config.overall_stats_folder)
                    .unwrap_or_else(|| PathBuf::from("."));
                aggregate::overall_stats_file(&folder)
            } else {
                let folder = output
                    .or(config.session_stats_folder)
                    .unwrap_or_else(|| PathBuf::from("."));
                aggregate::session_stats_file(&folder, &since)
            };
            aggregate::write_aggregated(&stats, &report)?;

            println!("games_aggregated: {}", processed.len());
            println!("report: {}", report.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn it_builds_a_consistent_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn it_documents_quit_gating_for_game_family() {
        let mut command = Cli::command();
        let Some(parse) = command.find_subcommand_mut("parse") else {
            panic!("expected a parse subcommand");
        };
        let help = parse.render_long_help().to_string();
        assert!(help.contains("does not flag the reporting player as quit"));
    }

    #[test]
    fn it_parses_aggregate_window() {
        let Ok(cli) = Cli::try_parse_from([
            "yrstats",
            "aggregate",
            "--since-time",
            "2024-01-02 18:30:00",
            "--overall",
        ]) else {
            panic!("expected aggregate arguments to parse");
        };
        let Command::Aggregate {
            since_time, overall, ..
        } = cli.command
        else {
            panic!("expected the aggregate subcommand");
        };
        assert!(overall);
        assert_eq!(since_time.map(|time| time.to_string()).as_deref(), Some("2024-01-02 18:30:00"));
        assert!(Cli::try_parse_from(["yrstats", "aggregate", "--since-time", "tuesday"]).is_err());
    }
}
