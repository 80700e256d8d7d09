//! Read-only per-frame view for presentation and reports.

use glam::Vec2;
use serde::Serialize;

use super::*;
use crate::geometry::Rect;
use crate::maze::Room;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: AgentKind,
    pub pos: Vec2,
    pub size: f32,
    /// Floored at zero.
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub ammo: Option<u32>,
    pub state: Option<BehaviorState>,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            kind: agent.kind(),
            pos: agent.pos(),
            size: agent.body.size,
            health: agent.display_health(),
            max_health: agent.max_health,
            alive: agent.alive,
            ammo: agent.ammo(),
            state: agent.behavior(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: ProjectileOwner,
    pub radius: f32,
    pub bounces: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PickupView {
    pub pos: Vec2,
    pub kind: PickupKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArenaSnapshot<'a> {
    pub frame: u64,
    pub elapsed_secs: f32,
    pub human: AgentView,
    /// Autonomous agents in spawn order, dead ones included.
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub rooms: &'a [Room],
    pub walls: &'a [Rect],
    pub winner: Option<Winner>,
}

impl Arena {
    pub fn snapshot(&self) -> ArenaSnapshot<'_> {
        ArenaSnapshot {
            frame: self.frame,
            elapsed_secs: self.elapsed_secs(),
            human: AgentView::from(self.human()),
            agents: self.autonomous_agents().map(AgentView::from).collect(),
            projectiles: self
                .projectiles
                .values()
                .map(|projectile| ProjectileView {
                    pos: projectile.pos,
                    vel: projectile.vel,
                    owner: projectile.owner,
                    radius: projectile.radius,
                    bounces: projectile.bounces,
                })
                .collect(),
            pickups: self
                .pickups
                .values()
                .map(|pickup| PickupView { pos: pickup.pos, kind: pickup.kind })
                .collect(),
            rooms: self.maze.rooms(),
            walls: self.maze.walls().as_slice(),
            winner: self.winner,
        }
    }
}
