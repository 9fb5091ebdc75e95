pub mod property;
pub mod types;

use chrono::{Local, TimeZone};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::GameFamily;
use crate::dump::types::{DecodedField, FieldValue, TagMap};
use crate::mappings::side_name;
use property::{split_tag, GlobalTag, PlayerProperty};
use types::{CompletionCode, GameReport, GameStats, PlayerStat};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Name of the player the dump is reported by.
    pub player_name: String,
    pub game: GameFamily,
}

/// Interprets a decoded tag map as a game report and per-slot player stats.
///
/// Tags are visited in stream order, so where two tags set the same field
/// (`QUIT` and `FINI`, `CMP` and `CMPL`) the later one decides.
pub fn classify(tags: &TagMap, options: &ClassifyOptions) -> GameStats {
    let mut classifier = Classifier::default();
    classifier.collect_names(tags, &options.player_name);
    for (tag, field) in tags {
        match split_tag(tag) {
            Some((property, slot)) => classifier.apply_player(property, slot, field),
            None => classifier.apply_global(tag, field, options.game),
        }
    }

    GameStats {
        game_report: classifier.report,
        player_stats: classifier.players,
        game_result: classifier.result,
    }
}

#[derive(Default)]
struct Classifier {
    report: GameReport,
    players: BTreeMap<u8, PlayerStat>,
    result: Option<CompletionCode>,
    reporter: Option<u8>,
}

impl Classifier {
    fn collect_names(&mut self, tags: &TagMap, player_name: &str) {
        for (tag, field) in tags {
            let Some(("NAM", slot)) = split_tag(tag) else {
                continue;
            };
            let name = field.value.as_ref().map(FieldValue::to_string);
            if name.as_deref() == Some(player_name) {
                self.reporter = Some(slot);
            }
            self.players.insert(
                slot,
                PlayerStat {
                    name,
                    ..PlayerStat::default()
                },
            );
        }
        if self.reporter.is_none() {
            debug!(player_name, "reporting player not found among slots");
        }
    }

    fn apply_player(&mut self, property: &str, slot: u8, field: &DecodedField) {
        let player = self.players.entry(slot).or_default();
        match PlayerProperty::parse(property) {
            PlayerProperty::Completion => {
                let mask = field.int().unwrap_or_default();
                player.disconnected = CompletionCode::Disconnected.is_set(mask);
                player.no_completion = CompletionCode::NoCompletion.is_set(mask);
                player.quit = CompletionCode::Quit.is_set(mask);
                player.won = CompletionCode::Won.is_set(mask);
                player.draw = CompletionCode::Draw.is_set(mask);
                player.defeated = CompletionCode::Defeated.is_set(mask);
                // A mask with no known bit leaves the previous label in place.
                if let Some(code) = CompletionCode::from_bitmask(mask) {
                    self.result = Some(code);
                }
            }
            PlayerProperty::Resigned => player.quit = field.is_truthy(),
            PlayerProperty::Dead => player.defeated = field.is_truthy(),
            // No ally grouping yet, every player is its own team.
            PlayerProperty::Ally => player.local_team_id = Some(slot),
            PlayerProperty::Spectator => player.spectator = field.is_truthy(),
            PlayerProperty::Connection => player.disconnected = field.is_truthy(),
            PlayerProperty::Country => {
                player.side = field
                    .int()
                    .and_then(side_name)
                    .map(ToString::to_string);
            }
            PlayerProperty::Name => {}
            PlayerProperty::Credits => player.funds_left = field.int(),
            PlayerProperty::Heap(heap) => match &field.counts {
                Some(counts) => {
                    let total: u64 = counts.values().map(|&count| u64::from(count)).sum();
                    *player.totals.entry(heap.key.to_string()).or_default() += total;
                    player
                        .detailed_counts
                        .insert(heap.key.to_string(), counts.clone());
                }
                None => {
                    player.raw.insert(property.to_string(), field.value.clone());
                }
            },
            PlayerProperty::Other => {
                player.raw.insert(property.to_string(), field.value.clone());
            }
        }
    }

    fn apply_global(&mut self, tag: &str, field: &DecodedField, game: GameFamily) {
        let report = &mut self.report;
        match GlobalTag::parse(tag) {
            GlobalTag::Completion => self.reconcile_completion(field),
            GlobalTag::OutOfSync => {
                let out_of_sync = field.is_truthy();
                report.reconnection_error = Some(out_of_sync);
                if out_of_sync {
                    // The reporter is credited with the win until the game is reviewed.
                    for player in self.players.values_mut() {
                        player.won = false;
                    }
                    if let Some(reporter) = self.reporter_mut() {
                        reporter.won = true;
                    }
                }
            }
            GlobalTag::SdfxDisconnect => {
                let disconnected = field.is_truthy();
                for player in self.players.values_mut() {
                    player.disconnected = disconnected;
                }
            }
            GlobalTag::Duration => report.duration = field.int(),
            GlobalTag::AverageFps => report.fps = field.int(),
            GlobalTag::Quit => {
                let quit = field.is_truthy();
                report.finished = Some(!quit);
                if game != GameFamily::Ra {
                    if let Some(reporter) = self.reporter_mut() {
                        reporter.quit = quit;
                    }
                }
            }
            GlobalTag::Finished => report.finished = Some(field.is_truthy()),
            GlobalTag::Time => {
                report.epoch_time = field.int();
                report.local_time = report.epoch_time.and_then(format_local_time);
            }
            GlobalTag::Scenario => report.map = field.value.as_ref().map(FieldValue::to_string),
            GlobalTag::StartingUnits => report.starting_units = field.int(),
            GlobalTag::StartingCredits => report.starting_credits = field.int(),
            GlobalTag::Superweapons => report.superweapons = Some(field.is_truthy()),
            GlobalTag::Crates => report.crates = Some(field.is_truthy()),
            GlobalTag::Players => report.players_in_game = field.int(),
            GlobalTag::BaseFlags => {
                let flags = field.int().unwrap_or_default();
                report.mcv_redeploy = Some(flags & 1 != 0);
                report.build_off_ally_conyards = Some(flags & 2 != 0);
            }
            GlobalTag::ShortGame => report.short_game = Some(field.is_truthy()),
            GlobalTag::AiPlayers => report.ai_players = field.int(),
            GlobalTag::Version => report.game_version = field.value.clone(),
            GlobalTag::Other => {
                report.raw.insert(tag.to_string(), field.value.clone());
            }
        }
    }

    /// `CMPL` overrides the per-slot completion flags, either as a draw for
    /// everyone or as a win/loss split decided by the reporter's own state.
    fn reconcile_completion(&mut self, field: &DecodedField) {
        if field.int() == Some(CompletionCode::Draw.bit()) {
            for player in self.players.values_mut() {
                player.draw = true;
                player.won = false;
                player.defeated = false;
                player.no_completion = false;
            }
            return;
        }

        let Some(reporter) = self.reporter_mut() else {
            warn!("CMPL present but the reporting player is unknown, keeping per-slot results");
            return;
        };
        let game_won = !reporter.defeated && !reporter.quit;
        for player in self.players.values_mut() {
            player.won = !game_won;
            player.defeated = !player.won;
            player.no_completion = false;
        }
        if let Some(reporter) = self.reporter_mut() {
            reporter.won = game_won;
            reporter.no_completion = false;
            reporter.defeated = !game_won;
        }
    }

    fn reporter_mut(&mut self) -> Option<&mut PlayerStat> {
        self.reporter.and_then(|slot| self.players.get_mut(&slot))
    }
}

fn format_local_time(epoch: u32) -> Option<String> {
    Local
        .timestamp_opt(i64::from(epoch), 0)
        .single()
        .map(|time| time.to_rfc2822())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(tag: &str, value: u32) -> (String, DecodedField) {
        scalar(tag, FieldValue::Int(value))
    }

    fn text(tag: &str, value: &str) -> (String, DecodedField) {
        scalar(tag, FieldValue::Text(value.to_string()))
    }

    fn scalar(tag: &str, value: FieldValue) -> (String, DecodedField) {
        (
            tag.to_string(),
            DecodedField {
                tag: tag.to_string(),
                length: 4,
                raw: None,
                value: Some(value),
                counts: None,
            },
        )
    }

    fn tag_map(fields: Vec<(String, DecodedField)>) -> TagMap {
        fields.into_iter().collect()
    }

    fn options(player_name: &str) -> ClassifyOptions {
        ClassifyOptions {
            player_name: player_name.to_string(),
            game: GameFamily::Yr,
        }
    }

    #[test]
    fn it_classifies_won_completion_and_time() {
        let tags = tag_map(vec![int("CMP2", 256), int("TIME", 1_700_000_000)]);
        let stats = classify(&tags, &options("nobody"));

        let player = &stats.player_stats[&2];
        assert!(player.won);
        assert!(!player.defeated && !player.draw && !player.quit);
        assert_eq!(stats.game_result, Some(CompletionCode::Won));
        assert_eq!(stats.game_report.epoch_time, Some(1_700_000_000));
        assert!(stats.game_report.local_time.is_some());
    }

    #[test]
    fn it_decodes_completion_bits_independently() {
        let tags = tag_map(vec![int("CMP0", 2 | 8 | 16 | 512)]);
        let stats = classify(&tags, &options(""));
        let player = &stats.player_stats[&0];
        assert!(player.disconnected && player.no_completion && player.quit && player.defeated);
        assert!(!player.won && !player.draw);
        assert_eq!(stats.game_result, Some(CompletionCode::Disconnected));
    }

    #[test]
    fn it_keeps_last_completion_label() {
        let tags = tag_map(vec![int("CMP0", 256), int("CMP1", 512)]);
        let stats = classify(&tags, &options(""));
        assert_eq!(stats.game_result, Some(CompletionCode::Defeated));

        let tags = tag_map(vec![int("CMP0", 256), int("CMP1", 512), int("CMP2", 0)]);
        let stats = classify(&tags, &options(""));
        assert_eq!(stats.game_result, Some(CompletionCode::Defeated));

        let tags = tag_map(vec![int("CMP0", 0), int("CMP1", 1 << 20)]);
        assert_eq!(classify(&tags, &options("")).game_result, None);
    }

    #[test]
    fn it_broadcasts_draw() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            int("CMP0", 256 | 8),
            int("CMP1", 512),
            int("CMPL", 64),
        ]);
        let stats = classify(&tags, &options("Boris"));
        for player in stats.player_stats.values() {
            assert!(player.draw);
            assert!(!player.won && !player.defeated && !player.no_completion);
        }
    }

    #[test]
    fn it_reconciles_completion_from_reporter() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            text("NAM2", "Yuri"),
            int("CMP0", 8),
            int("CMPL", 1),
        ]);
        let stats = classify(&tags, &options("Boris"));
        let reporter = &stats.player_stats[&0];
        assert!(reporter.won && !reporter.defeated && !reporter.no_completion);
        for slot in [1, 2] {
            let player = &stats.player_stats[&slot];
            assert!(!player.won && player.defeated);
        }
    }

    #[test]
    fn it_reconciles_defeated_reporter_as_loss() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            scalar("DED0", FieldValue::Bool(true)),
            int("CMPL", 1),
        ]);
        let stats = classify(&tags, &options("Boris"));
        assert!(!stats.player_stats[&0].won && stats.player_stats[&0].defeated);
        assert!(stats.player_stats[&1].won && !stats.player_stats[&1].defeated);
    }

    #[test]
    fn it_leaves_results_alone_without_reporter() {
        let tags = tag_map(vec![text("NAM0", "Boris"), int("CMP0", 512), int("CMPL", 1)]);
        let stats = classify(&tags, &options("Natasha"));
        assert!(stats.player_stats[&0].defeated);
        assert!(!stats.player_stats[&0].won);
    }

    #[test]
    fn it_credits_reporter_on_out_of_sync() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            text("NAM2", "Yuri"),
            int("CMP0", 256),
            int("CMP2", 256),
            scalar("OOSY", FieldValue::Bool(true)),
        ]);
        let stats = classify(&tags, &options("Tanya"));
        assert_eq!(stats.game_report.reconnection_error, Some(true));
        assert!(!stats.player_stats[&0].won);
        assert!(stats.player_stats[&1].won);
        assert!(!stats.player_stats[&2].won);
    }

    #[test]
    fn it_clears_wins_on_out_of_sync_without_reporter() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            int("CMP0", 256),
            scalar("OOSY", FieldValue::Bool(true)),
        ]);
        let stats = classify(&tags, &options("Natasha"));
        assert_eq!(stats.game_report.reconnection_error, Some(true));
        assert!(stats.player_stats.values().all(|player| !player.won));
    }

    #[test]
    fn it_broadcasts_sdfx_disconnect() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            int("SDFX", 1),
        ]);
        let stats = classify(&tags, &options("Boris"));
        assert!(stats.player_stats.values().all(|player| player.disconnected));
    }

    #[test]
    fn it_applies_quit_per_game_family() {
        let tags = tag_map(vec![text("NAM0", "Boris"), int("QUIT", 1)]);

        let stats = classify(&tags, &options("Boris"));
        assert_eq!(stats.game_report.finished, Some(false));
        assert!(stats.player_stats[&0].quit);

        let red_alert = ClassifyOptions {
            game: GameFamily::Ra,
            ..options("Boris")
        };
        let stats = classify(&tags, &red_alert);
        assert_eq!(stats.game_report.finished, Some(false));
        assert!(!stats.player_stats[&0].quit);
    }

    #[test]
    fn it_only_sets_finished_on_quit_without_reporter() {
        let tags = tag_map(vec![text("NAM0", "Boris"), int("QUIT", 1)]);
        let stats = classify(&tags, &options("Natasha"));
        assert_eq!(stats.game_report.finished, Some(false));
        assert!(!stats.player_stats[&0].quit);
        assert_eq!(stats.player_stats.len(), 1);
    }

    #[test]
    fn it_lets_later_fini_override_quit() {
        let tags = tag_map(vec![int("QUIT", 1), int("FINI", 1)]);
        assert_eq!(classify(&tags, &options("")).game_report.finished, Some(true));

        let tags = tag_map(vec![int("FINI", 1), int("QUIT", 1)]);
        assert_eq!(classify(&tags, &options("")).game_report.finished, Some(false));
    }

    #[test]
    fn it_fills_player_properties() {
        let tags = tag_map(vec![
            text("NAM3", "Boris"),
            int("CTY3", 8),
            int("CRD3", 12500),
            int("ALY3", 0),
            scalar("SPC3", FieldValue::Bool(false)),
            int("LCN3", 1),
            int("HRV3", 77),
        ]);
        let stats = classify(&tags, &options("Boris"));
        let player = &stats.player_stats[&3];
        assert_eq!(player.name.as_deref(), Some("Boris"));
        assert_eq!(player.side.as_deref(), Some("Russia"));
        assert_eq!(player.funds_left, Some(12500));
        assert_eq!(player.local_team_id, Some(3));
        assert!(!player.spectator);
        assert!(player.disconnected);
        assert_eq!(player.raw.get("HRV"), Some(&Some(FieldValue::Int(77))));
    }

    #[test]
    fn it_folds_heap_counts() {
        let (key, mut field) = int("UNB1", 0);
        field.value = None;
        field.counts = Some(BTreeMap::from([
            (String::from("AMCV"), 1),
            (String::from("HTNK"), 6),
        ]));
        let (empty_key, mut empty) = int("INK1", 0);
        empty.value = None;
        let tags = tag_map(vec![(key, field), (empty_key, empty)]);

        let stats = classify(&tags, &options(""));
        let player = &stats.player_stats[&1];
        assert_eq!(player.totals.get("units_bought"), Some(&7));
        assert_eq!(player.detailed_counts["units_bought"]["HTNK"], 6);
        assert_eq!(player.raw.get("INK"), Some(&None));
    }

    #[test]
    fn it_fills_game_report() {
        let tags = tag_map(vec![
            int("DURA", 1234),
            int("AFPS", 59),
            text("SCEN", "Tour of Egypt"),
            int("UNIT", 10),
            int("CRED", 10000),
            int("SUPR", 0),
            int("CRAT", 1),
            int("PLRS", 2),
            int("BAMR", 2),
            int("SHRT", 1),
            int("AIPL", 0),
            text("VERS", "1.001"),
            int("GSKY", 3),
        ]);
        let report = classify(&tags, &options("")).game_report;
        assert_eq!(report.duration, Some(1234));
        assert_eq!(report.fps, Some(59));
        assert_eq!(report.map.as_deref(), Some("Tour of Egypt"));
        assert_eq!(report.starting_units, Some(10));
        assert_eq!(report.starting_credits, Some(10000));
        assert_eq!(report.superweapons, Some(false));
        assert_eq!(report.crates, Some(true));
        assert_eq!(report.players_in_game, Some(2));
        assert_eq!(report.mcv_redeploy, Some(false));
        assert_eq!(report.build_off_ally_conyards, Some(true));
        assert_eq!(report.short_game, Some(true));
        assert_eq!(report.ai_players, Some(0));
        assert_eq!(report.game_version, Some(FieldValue::Text(String::from("1.001"))));
        assert_eq!(report.raw.get("GSKY"), Some(&Some(FieldValue::Int(3))));
    }

    #[test]
    fn it_is_idempotent() {
        let tags = tag_map(vec![
            text("NAM0", "Boris"),
            text("NAM1", "Tanya"),
            int("CMP1", 512),
            int("CMPL", 1),
            int("OOSY", 1),
            int("TIME", 1_600_000_000),
        ]);
        let options = options("Boris");
        assert_eq!(classify(&tags, &options), classify(&tags, &options));
    }
}
