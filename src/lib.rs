pub mod aggregate;
pub mod config;
pub mod dump;
pub mod error;
pub mod mappings;
pub mod output;
pub mod stats;

use dump::types::TagMap;
use error::Result;
use output::StagedArtifacts;
use stats::ClassifyOptions;
use std::fs;
use std::path::Path;

pub fn load_stats_dump(stats_file: &Path) -> Result<TagMap> {
    let data = fs::read(stats_file)?;
    dump::build_tag_map(&data)
}

/// Decodes and classifies `stats_file`, then stages it with its JSON reports.
pub fn process_stats_dump(
    stats_file: &Path,
    output_folder: &Path,
    options: &ClassifyOptions,
) -> Result<StagedArtifacts> {
    let tags = load_stats_dump(stats_file)?;
    let stats = stats::classify(&tags, options);
    output::stage_artifacts(stats_file, output_folder, &tags, &stats)
}
