use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dump::types::TagMap;
use crate::error::{Error, Result};
use crate::stats::types::GameStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifacts {
    pub folder: PathBuf,
    pub stats_dump: PathBuf,
    pub stats_parsed: PathBuf,
    pub stats_raw: PathBuf,
}

/// Stores the original dump and both JSON documents under
/// `<output_folder>/<local start time>/`, each prefixed with the epoch time.
pub fn stage_artifacts(
    stats_file: &Path,
    output_folder: &Path,
    tags: &TagMap,
    stats: &GameStats,
) -> Result<StagedArtifacts> {
    let epoch = stats
        .game_report
        .epoch_time
        .ok_or(Error::MissingEpochTime)?;

    // Serialize first so a failure leaves nothing half written.
    let parsed_json = to_pretty_json(stats)?;
    let raw_json = to_pretty_json(tags)?;

    let folder = output_folder.join(folder_name(epoch));
    fs::create_dir_all(&folder)?;

    let artifacts = StagedArtifacts {
        stats_dump: folder.join(format!("{epoch}_stats.dmp")),
        stats_parsed: folder.join(format!("{epoch}_stats_parsed.json")),
        stats_raw: folder.join(format!("{epoch}_stats_raw.json")),
        folder,
    };
    fs::copy(stats_file, &artifacts.stats_dump)?;
    fs::write(&artifacts.stats_parsed, parsed_json)?;
    fs::write(&artifacts.stats_raw, raw_json)?;

    info!(folder = %artifacts.folder.display(), "staged stats artifacts");
    Ok(artifacts)
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Local wall-clock time of the match, e.g. `2023-11-14 22-13-20`.
pub fn folder_name(epoch: u32) -> String {
    match Local.timestamp_opt(i64::from(epoch), 0).single() {
        Some(time) => time.format("%Y-%m-%d %H-%M-%S").to_string(),
        None => epoch.to_string(),
    }
}
