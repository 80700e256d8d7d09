//! Match state and the fixed-order frame loop.
//! Submodules split setup, per-frame phases, snapshots and hashing; they all extend `Arena`.

mod frame;
mod hash;
mod snapshot;
mod spawn;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

use slotmap::SlotMap;

use crate::agent::Agent;
use crate::config::ArenaConfig;
use crate::maze::Maze;
use crate::pickups::Pickup;
use crate::projectile::Projectile;
use crate::rng::ArenaRng;
use crate::types::*;

pub use snapshot::{AgentView, ArenaSnapshot, PickupView, ProjectileView};
pub use spawn::ArenaLayout;

pub struct Arena {
    seed: u64,
    frame: u64,
    rng: ArenaRng,
    config: ArenaConfig,
    maze: Maze,
    agents: SlotMap<AgentId, Agent>,
    projectiles: SlotMap<ProjectileId, Projectile>,
    pickups: SlotMap<PickupId, Pickup>,
    human_id: AgentId,
    winner: Option<Winner>,
    log: Vec<ArenaEvent>,
}

impl Arena {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.frame as f32 * self.config.frame_dt
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn human_id(&self) -> AgentId {
        self.human_id
    }

    pub fn human(&self) -> &Agent {
        &self.agents[self.human_id]
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Every agent, human first, in spawn order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn autonomous_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values().filter(|agent| agent.kind() == AgentKind::Autonomous)
    }

    pub fn live_agent_count(&self) -> usize {
        self.agents.values().filter(|agent| agent.alive).count()
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.values()
    }

    pub fn pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.values()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    pub fn log(&self) -> &[ArenaEvent] {
        &self.log
    }
}
