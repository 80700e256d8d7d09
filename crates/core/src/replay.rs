use thiserror::Error;

use crate::arena::Arena;
use crate::config::ConfigError;
use crate::journal::IntentJournal;
use crate::types::{HumanIntent, Winner};

#[derive(Debug, PartialEq, Error)]
pub enum ReplayError {
    #[error("journal config is invalid: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("journal records frame {frame} but the match finished at frame {finished_at}")]
    RecordAfterFinish { frame: u64, finished_at: u64 },
    #[error("journal records frame {frame} out of order, replay is already at frame {current}")]
    OutOfOrderRecord { frame: u64, current: u64 },
    #[error("no winner after {frames} frames")]
    BudgetExhausted { frames: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub winner: Winner,
    pub final_frame: u64,
    pub final_snapshot_hash: u64,
}

/// Re-runs the journal's match from its seed, applying each recorded intent on its frame and idling
/// in between, until a winner is decided or `max_frames` frames have run.
pub fn replay_to_end(journal: &IntentJournal, max_frames: u64) -> Result<ReplayResult, ReplayError> {
    let mut arena = Arena::new(journal.seed, journal.config.clone())?;
    let mut records = journal.records.iter().peekable();

    while !arena.is_finished() && arena.frame() < max_frames {
        let frame = arena.frame();
        let intent = match records.next_if(|record| record.frame <= frame) {
            Some(record) if record.frame < frame => {
                return Err(ReplayError::OutOfOrderRecord { frame: record.frame, current: frame });
            }
            Some(record) => record.intent,
            None => HumanIntent::IDLE,
        };
        arena.step(&intent);
    }

    let Some(winner) = arena.winner() else {
        return Err(ReplayError::BudgetExhausted { frames: arena.frame() });
    };
    if let Some(record) = records.next() {
        return Err(ReplayError::RecordAfterFinish { frame: record.frame, finished_at: arena.frame() });
    }
    Ok(ReplayResult {
        winner,
        final_frame: arena.frame(),
        final_snapshot_hash: arena.snapshot_hash(),
    })
}
