//! Projectile versus agent hit resolution.

use slotmap::SlotMap;

use crate::agent::Agent;
use crate::projectile::Projectile;
use crate::types::{AgentId, AgentKind, ProjectileId, ProjectileOwner};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub projectile: ProjectileId,
    pub agent: AgentId,
    pub kind: AgentKind,
    pub owner: ProjectileOwner,
    pub damage: i32,
    /// This hit took the agent from alive to dead.
    pub eliminated: bool,
}

fn fired_by(owner: ProjectileOwner, agent: &Agent) -> bool {
    match owner {
        ProjectileOwner::Human => agent.kind() == AgentKind::Human,
        ProjectileOwner::Agent(id) => id == agent.id,
    }
}

/// Tests every live projectile against every live agent other than its firer, in agent order.
///
/// A projectile strikes at most one agent and dies on contact. Hits on the same agent within a
/// frame are not deduplicated, so several projectiles can overkill one target.
pub fn resolve_hits(
    agents: &mut SlotMap<AgentId, Agent>,
    projectiles: &mut SlotMap<ProjectileId, Projectile>,
) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (projectile_id, projectile) in projectiles.iter_mut() {
        if !projectile.alive {
            continue;
        }
        let struck = agents.values_mut().find(|agent| {
            agent.alive
                && !fired_by(projectile.owner, agent)
                && agent.pos().distance(projectile.pos) < agent.body.half_extent() + projectile.radius
        });
        let Some(agent) = struck else {
            continue;
        };
        projectile.alive = false;
        let eliminated = agent.apply_damage(projectile.damage);
        hits.push(Hit {
            projectile: projectile_id,
            agent: agent.id,
            kind: agent.kind(),
            owner: projectile.owner,
            damage: projectile.damage,
            eliminated,
        });
    }
    hits
}
