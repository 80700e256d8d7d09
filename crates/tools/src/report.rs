use std::fs;
use std::io;
use std::path::Path;

use arena_core::{Arena, ArenaEvent, Winner};
use serde::{Deserialize, Serialize};

pub const REPORT_FORMAT_VERSION: u32 = 1;

/// End-of-run summary written by `arena run --report`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub format_version: u32,
    pub seed: u64,
    pub winner: Option<Winner>,
    pub frames: u64,
    pub elapsed_secs: f32,
    pub snapshot_hash_hex: String,
    pub human_health: i32,
    pub human_ammo: u32,
    pub autonomous_alive: usize,
    pub eliminations: usize,
    pub projectiles_fired: usize,
    pub journal_records: u64,
}

impl MatchReport {
    pub fn from_arena(arena: &Arena, journal_records: u64) -> Self {
        let human = arena.human();
        Self {
            format_version: REPORT_FORMAT_VERSION,
            seed: arena.seed(),
            winner: arena.winner(),
            frames: arena.frame(),
            elapsed_secs: arena.elapsed_secs(),
            snapshot_hash_hex: format!("0x{:016x}", arena.snapshot_hash()),
            human_health: human.display_health(),
            human_ammo: human.ammo().unwrap_or(0),
            autonomous_alive: arena.autonomous_agents().filter(|agent| agent.alive).count(),
            eliminations: count_events(arena, |event| {
                matches!(event, ArenaEvent::AgentEliminated { .. })
            }),
            projectiles_fired: count_events(arena, |event| {
                matches!(event, ArenaEvent::ProjectileFired { .. })
            }),
            journal_records,
        }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    #[cfg(test)]
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

fn count_events(arena: &Arena, wanted: fn(&ArenaEvent) -> bool) -> usize {
    arena.log().iter().filter(|event| wanted(event)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{ArenaConfig, HumanIntent};
    use tempfile::tempdir;

    fn sample() -> MatchReport {
        MatchReport {
            format_version: REPORT_FORMAT_VERSION,
            seed: 99,
            winner: Some(Winner::Human),
            frames: 1_204,
            elapsed_secs: 20.066,
            snapshot_hash_hex: "0x00000000deadbeef".to_string(),
            human_health: 64,
            human_ammo: 7,
            autonomous_alive: 0,
            eliminations: 10,
            projectiles_fired: 41,
            journal_records: 880,
        }
    }

    #[test]
    fn test_atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("match.json");

        let report = sample();
        report.write_atomic(&path).unwrap();
        assert!(path.exists());

        let loaded = MatchReport::load(&path).unwrap();
        assert_eq!(report, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("match.json");
        fs::write(&path, "{ not json").unwrap();

        let error = MatchReport::load(&path).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_report_reflects_fresh_arena() {
        let config = ArenaConfig::default();
        let ammo = config.human.starting_ammo;
        let mut arena = Arena::new(5, config).unwrap();
        arena.step(&HumanIntent::IDLE);

        let report = MatchReport::from_arena(&arena, 0);
        assert_eq!(report.seed, 5);
        assert_eq!(report.frames, 1);
        assert_eq!(report.winner, None);
        assert!(report.human_ammo >= ammo, "ammo only grows without firing");
        assert_eq!(report.eliminations, 0);
        assert_eq!(report.snapshot_hash_hex.len(), 18);
    }
}
