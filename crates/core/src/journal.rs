use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::types::HumanIntent;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Everything needed to re-run a match: seed, config and the human's non-idle intents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: ArenaConfig,
    pub records: Vec<IntentRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Frame number the intent was applied on, counted from zero.
    pub frame: u64,
    pub intent: HumanIntent,
}

impl IntentJournal {
    pub fn new(seed: u64, config: ArenaConfig) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, config, records: Vec::new() }
    }

    /// Records `intent` for `frame`. Idle intents are implied and not stored.
    pub fn record(&mut self, frame: u64, intent: HumanIntent) -> bool {
        if intent.is_idle() {
            return false;
        }
        self.records.push(IntentRecord { frame, intent });
        true
    }
}
