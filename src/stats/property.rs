use crate::mappings::{find_heap, CountableHeap};

use super::types::MAX_PLAYERS;

/// Per-slot property carried in the first three letters of a slot tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerProperty {
    Completion,
    Resigned,
    Dead,
    Ally,
    Spectator,
    Connection,
    Country,
    Name,
    Credits,
    Heap(&'static CountableHeap),
    Other,
}

impl PlayerProperty {
    pub fn parse(code: &str) -> Self {
        match code {
            "CMP" => PlayerProperty::Completion,
            "RSG" => PlayerProperty::Resigned,
            "DED" => PlayerProperty::Dead,
            "ALY" => PlayerProperty::Ally,
            "SPC" => PlayerProperty::Spectator,
            // LCN is the Tiberian Sun spelling.
            "LCN" | "CON" => PlayerProperty::Connection,
            "CTY" => PlayerProperty::Country,
            "NAM" => PlayerProperty::Name,
            "CRD" => PlayerProperty::Credits,
            other => find_heap(other).map_or(PlayerProperty::Other, PlayerProperty::Heap),
        }
    }
}

/// Tags that describe the whole game rather than one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalTag {
    Completion,
    OutOfSync,
    SdfxDisconnect,
    Duration,
    AverageFps,
    Quit,
    Finished,
    Time,
    Scenario,
    StartingUnits,
    StartingCredits,
    Superweapons,
    Crates,
    Players,
    BaseFlags,
    ShortGame,
    AiPlayers,
    Version,
    Other,
}

impl GlobalTag {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "CMPL" => GlobalTag::Completion,
            "OOSY" => GlobalTag::OutOfSync,
            "SDFX" => GlobalTag::SdfxDisconnect,
            "DURA" => GlobalTag::Duration,
            "AFPS" => GlobalTag::AverageFps,
            "QUIT" => GlobalTag::Quit,
            "FINI" => GlobalTag::Finished,
            "TIME" => GlobalTag::Time,
            "SCEN" => GlobalTag::Scenario,
            "UNIT" => GlobalTag::StartingUnits,
            "CRED" => GlobalTag::StartingCredits,
            "SUPR" => GlobalTag::Superweapons,
            "CRAT" => GlobalTag::Crates,
            "PLRS" => GlobalTag::Players,
            "BAMR" => GlobalTag::BaseFlags,
            "SHRT" => GlobalTag::ShortGame,
            "AIPL" => GlobalTag::AiPlayers,
            "VERS" => GlobalTag::Version,
            _ => GlobalTag::Other,
        }
    }
}

/// Splits `CMP3` into `("CMP", 3)`. Tags whose last character is not a slot
/// digit are global.
pub fn split_tag(tag: &str) -> Option<(&str, u8)> {
    let (index, last) = tag.char_indices().last()?;
    let slot = last.to_digit(10).and_then(|digit| u8::try_from(digit).ok())?;
    (slot < MAX_PLAYERS).then(|| (&tag[..index], slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_splits_slot_tags() {
        assert_eq!(split_tag("CMP3"), Some(("CMP", 3)));
        assert_eq!(split_tag("NAM0"), Some(("NAM", 0)));
        assert_eq!(split_tag("UNB7"), Some(("UNB", 7)));
        assert_eq!(split_tag("XYZ8"), None);
        assert_eq!(split_tag("CMPL"), None);
        assert_eq!(split_tag(""), None);
    }

    #[test]
    fn it_parses_player_properties() {
        assert_eq!(PlayerProperty::parse("LCN"), PlayerProperty::Connection);
        assert_eq!(PlayerProperty::parse("CON"), PlayerProperty::Connection);
        assert!(matches!(
            PlayerProperty::parse("BLC"),
            PlayerProperty::Heap(heap) if heap.key == "buildings_captured"
        ));
        assert_eq!(PlayerProperty::parse("HRV"), PlayerProperty::Other);
    }

    #[test]
    fn it_parses_global_tags() {
        assert_eq!(GlobalTag::parse("BAMR"), GlobalTag::BaseFlags);
        assert_eq!(GlobalTag::parse("OOSY"), GlobalTag::OutOfSync);
        assert_eq!(GlobalTag::parse("GSKY"), GlobalTag::Other);
    }
}
