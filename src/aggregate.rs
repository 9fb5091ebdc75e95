use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::output::folder_name;
use crate::stats::types::{GameStats, PlayerStat};

const PARSED_SUFFIX: &str = "_parsed.json";
const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";
const NO_WINNER: &str = "AI";

/// Session or overall totals summed over a set of parsed games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedStats {
    pub games_played: u32,
    /// Distinct maps, in the order they were first played.
    pub maps_played: Vec<String>,
    pub total_duration_secs: u64,
    pub total_duration: String,
    pub player_stats: BTreeMap<String, PlayerTotals>,
    pub game_history: Vec<GameHistoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerTotals {
    pub games_played: u32,
    pub funds_left: u64,
    pub funds_left_avg: f64,
    pub disconnections: u32,
    pub no_completions: u32,
    pub quits: u32,
    pub wins: u32,
    pub draws: u32,
    pub defeats: u32,
    /// Games played per side.
    pub sides: BTreeMap<String, u32>,
    #[serde(flatten)]
    pub totals: BTreeMap<String, u64>,
    pub detailed_counts: BTreeMap<String, BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameHistoryEntry {
    pub map: String,
    /// `name/side` per player, in slot order.
    pub players: Vec<String>,
    pub duration: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_start_time: Option<String>,
    pub winner: String,
    #[serde(skip)]
    pub epoch_time: u32,
}

impl AggregatedStats {
    /// Folds one classified game into the totals. `since` anchors the
    /// entry's relative start time.
    pub fn add_game(&mut self, stats: &GameStats, since: &DateTime<Local>, aliases: &[Vec<String>]) {
        let report = &stats.game_report;
        let map = report.map.clone().unwrap_or_default();
        let duration = report.duration.unwrap_or_default();
        let epoch_time = report.epoch_time.unwrap_or_default();

        self.games_played += 1;
        if !self.maps_played.contains(&map) {
            self.maps_played.push(map.clone());
        }
        self.total_duration_secs += u64::from(duration);
        self.total_duration = format_duration(Duration::seconds(self.total_duration_secs as i64));

        let mut entry = GameHistoryEntry {
            map,
            players: Vec::new(),
            duration: format_duration(Duration::seconds(i64::from(duration))),
            start_time: Local
                .timestamp_opt(i64::from(epoch_time), 0)
                .single()
                .map(|time| time.format(HISTORY_TIME_FORMAT).to_string())
                .unwrap_or_default(),
            relative_start_time: Some(format_duration(Duration::seconds(
                i64::from(epoch_time) - since.timestamp(),
            ))),
            winner: NO_WINNER.to_string(),
            epoch_time,
        };

        for (slot, player) in &stats.player_stats {
            let Some(name) = player.name.as_deref() else {
                debug!(slot, "skipping unnamed player slot");
                continue;
            };
            let name = resolve_player_alias(aliases, name);
            if player.won {
                entry.winner = name.to_string();
            }
            entry
                .players
                .push(format!("{name}/{}", player.side.as_deref().unwrap_or_default()));
            self.player_stats
                .entry(name.to_string())
                .or_default()
                .add(player);
        }

        self.game_history.push(entry);
        self.game_history.sort_by_key(|entry| entry.epoch_time);
    }

    /// Overall reports span many sessions, so relative start times are dropped.
    pub fn clear_relative_start_times(&mut self) {
        for entry in &mut self.game_history {
            entry.relative_start_time = None;
        }
    }
}

impl PlayerTotals {
    fn add(&mut self, player: &PlayerStat) {
        self.games_played += 1;
        self.funds_left += u64::from(player.funds_left.unwrap_or_default());
        self.funds_left_avg = self.funds_left as f64 / f64::from(self.games_played);
        self.disconnections += u32::from(player.disconnected);
        self.no_completions += u32::from(player.no_completion);
        self.quits += u32::from(player.quit);
        self.wins += u32::from(player.won);
        self.draws += u32::from(player.draw);
        self.defeats += u32::from(player.defeated);
        *self
            .sides
            .entry(player.side.clone().unwrap_or_default())
            .or_default() += 1;

        for (key, total) in &player.totals {
            *self.totals.entry(key.clone()).or_default() += total;
        }
        for (heap, counts) in &player.detailed_counts {
            let summed = self.detailed_counts.entry(heap.clone()).or_default();
            for (item, count) in counts {
                *summed.entry(item.clone()).or_default() += u64::from(*count);
            }
        }
    }
}

/// The canonical (first) name of the alias group containing `name`.
pub fn resolve_player_alias<'a>(aliases: &'a [Vec<String>], name: &'a str) -> &'a str {
    aliases
        .iter()
        .find(|group| group.iter().any(|alias| alias == name))
        .and_then(|group| group.first())
        .map_or(name, String::as_str)
}

/// Clock text such as `1:02:05` or `2 days, 0:00:00`, `-` prefixed when negative.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let (days, secs) = (total / 86_400, total % 86_400);
    let clock = format!("{}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60);
    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        days => format!("{sign}{days} days, {clock}"),
    }
}

/// Start of the aggregation window. An explicit time wins over a day count,
/// which wins over today's midnight. `None` when no window was asked for.
pub fn since_cutoff(
    today: NaiveDate,
    since_today: bool,
    last_n_days: Option<u32>,
    since_time: Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    if since_time.is_some() {
        return since_time;
    }
    let day = match (last_n_days, since_today) {
        (Some(days), _) => today.checked_sub_signed(Duration::days(i64::from(days)))?,
        (None, true) => today,
        (None, false) => return None,
    };
    day.and_hms_opt(0, 0, 0)
}

pub fn parse_since_time(text: &str) -> std::result::Result<NaiveDateTime, String> {
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(time);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid time {text:?}, expected YYYY-MM-DD[ HH:MM:SS]"))
}

/// Interprets a wall-clock cutoff in the local time zone.
pub fn local_cutoff(time: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&time)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&time))
}

/// Sums every `<epoch>_*_parsed.json` below `folder` whose epoch is after
/// `since`, oldest first. Returns the totals and the files folded in.
pub fn aggregate_folder(
    folder: &Path,
    since: &DateTime<Local>,
    aliases: &[Vec<String>],
) -> Result<(AggregatedStats, Vec<PathBuf>)> {
    let mut files: Vec<(i64, PathBuf)> = WalkDir::new(folder)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let epoch = file_epoch(entry.path())?;
            (epoch > since.timestamp()).then(|| (epoch, entry.into_path()))
        })
        .collect();
    files.sort();

    let mut aggregated = AggregatedStats::default();
    let mut processed = Vec::with_capacity(files.len());
    for (_, path) in files {
        let content = fs::read_to_string(&path)?;
        let stats: GameStats = match serde_json::from_str(&content) {
            Ok(stats) => stats,
            Err(error) => {
                warn!(file = %path.display(), %error, "could not parse game stats, skipping");
                continue;
            }
        };
        debug!(file = %path.display(), "aggregating game stats");
        aggregated.add_game(&stats, since, aliases);
        processed.push(path);
    }
    info!(
        folder = %folder.display(),
        games = aggregated.games_played,
        "aggregated parsed game stats"
    );
    Ok((aggregated, processed))
}

fn file_epoch(path: &Path) -> Option<i64> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(PARSED_SUFFIX)?;
    stem.split('_').next()?.parse().ok()
}

/// `<folder>/<local cutoff time>/<cutoff epoch>_session_stats.json`
pub fn session_stats_file(folder: &Path, since: &DateTime<Local>) -> PathBuf {
    let folder = match u32::try_from(since.timestamp()) {
        Ok(epoch) => folder.join(folder_name(epoch)),
        Err(_) => folder.to_path_buf(),
    };
    folder.join(format!("{}_session_stats.json", since.timestamp()))
}

pub fn overall_stats_file(folder: &Path) -> PathBuf {
    folder.join("overall_stats.json")
}

/// Writes `stats` as pretty JSON, creating parent folders as needed.
pub fn write_aggregated(stats: &AggregatedStats, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    info!(file = %path.display(), "wrote aggregated stats");
    Ok(())
}
