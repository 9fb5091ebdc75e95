use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dump::types::FieldValue;

pub const MAX_PLAYERS: u8 = 8;

/// Bits of the `CMP` completion bitmask, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionCode {
    #[serde(rename = "COMPLETION_BIT1")]
    Bit1,
    #[serde(rename = "COMPLETION_DISCONNECTED")]
    Disconnected,
    #[serde(rename = "COMPLETION_BIT4")]
    Bit4,
    #[serde(rename = "COMPLETION_NO_COMPLETION")]
    NoCompletion,
    #[serde(rename = "COMPLETION_QUIT")]
    Quit,
    #[serde(rename = "COMPLETION_BIT32")]
    Bit32,
    #[serde(rename = "COMPLETION_DRAW")]
    Draw,
    #[serde(rename = "COMPLETION_BIT128")]
    Bit128,
    #[serde(rename = "COMPLETION_WON")]
    Won,
    #[serde(rename = "COMPLETION_DEFEATED")]
    Defeated,
    #[serde(rename = "COMPLETION_BIT1024")]
    Bit1024,
    #[serde(rename = "COMPLETION_BIT2048")]
    Bit2048,
    #[serde(rename = "COMPLETION_BIT4096")]
    Bit4096,
    #[serde(rename = "COMPLETION_BIT8192")]
    Bit8192,
    #[serde(rename = "COMPLETION_BIT16384")]
    Bit16384,
    #[serde(rename = "COMPLETION_BIT32768")]
    Bit32768,
}

impl CompletionCode {
    pub const ALL: [CompletionCode; 16] = [
        CompletionCode::Bit1,
        CompletionCode::Disconnected,
        CompletionCode::Bit4,
        CompletionCode::NoCompletion,
        CompletionCode::Quit,
        CompletionCode::Bit32,
        CompletionCode::Draw,
        CompletionCode::Bit128,
        CompletionCode::Won,
        CompletionCode::Defeated,
        CompletionCode::Bit1024,
        CompletionCode::Bit2048,
        CompletionCode::Bit4096,
        CompletionCode::Bit8192,
        CompletionCode::Bit16384,
        CompletionCode::Bit32768,
    ];

    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    pub fn is_set(self, mask: u32) -> bool {
        mask & self.bit() != 0
    }

    /// The first code in [`CompletionCode::ALL`] whose bit is set, `None` when
    /// `mask` carries no known bit.
    pub fn from_bitmask(mask: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.is_set(mask))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    pub disconnected: bool,
    pub no_completion: bool,
    pub quit: bool,
    pub won: bool,
    pub draw: bool,
    pub defeated: bool,
    pub spectator: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_team_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds_left: Option<u32>,
    pub detailed_counts: BTreeMap<String, BTreeMap<String, u32>>,
    /// Summed heap counts, e.g. `units_bought`.
    #[serde(flatten)]
    pub totals: BTreeMap<String, u64>,
    pub raw: BTreeMap<String, Option<FieldValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_units: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_credits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superweapons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players_in_game: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcv_redeploy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_off_ally_conyards: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_game: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_players: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconnection_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_version: Option<FieldValue>,
    pub raw: BTreeMap<String, Option<FieldValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub game_report: GameReport,
    pub player_stats: BTreeMap<u8, PlayerStat>,
    pub game_result: Option<CompletionCode>,
}
