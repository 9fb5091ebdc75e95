#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("heap {tag} ({heap}): count index {index} is beyond the {category} table ({len} entries)")]
    HeapIndexOverflow {
        tag: String,
        heap: &'static str,
        category: &'static str,
        index: usize,
        len: usize,
    },

    #[error("game report has no TIME field, cannot name the output folder")]
    MissingEpochTime,

    #[error("no player name given (use --player or player_name in the config file)")]
    MissingPlayerName,

    #[error("no aggregation window given (use --since-today, --since-last-n-days or --since-time)")]
    MissingSince,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
