//! One frame, in fixed phase order: human intent, autonomous agents, projectile flight, combat,
//! pickups, win check.

use tracing::{debug, info};

use super::*;
use crate::agent::Controller;
use crate::ai::{self, Contender, PolicyContext};
use crate::combat::resolve_hits;
use crate::pickups::{collect, roll_drop};
use crate::projectile::ProjectileStep;

impl Arena {
    /// Runs exactly one frame. Once a winner is decided this is a no-op that repeats the result.
    pub fn step(&mut self, intent: &HumanIntent) -> FrameReport {
        if let Some(winner) = self.winner {
            return FrameReport { frame: self.frame, winner: Some(winner), ..FrameReport::default() };
        }

        self.resolve_human_intent(intent);
        self.run_autonomous_agents();
        self.advance_projectiles();
        let mut report = self.resolve_combat();
        self.resolve_pickups();
        self.projectiles.retain(|_, projectile| projectile.alive);

        self.frame += 1;
        report.frame = self.frame;
        report.winner = self.check_winner();
        report
    }

    pub fn advance(&mut self, max_frames: u32, intent: &HumanIntent) -> AdvanceResult {
        let mut frames = 0;
        while frames < max_frames {
            if let Some(winner) = self.winner {
                return AdvanceResult {
                    simulated_frames: frames,
                    stop_reason: AdvanceStopReason::Finished(winner),
                };
            }
            self.step(intent);
            frames += 1;
        }

        let stop_reason = match self.winner {
            Some(winner) => AdvanceStopReason::Finished(winner),
            None => AdvanceStopReason::BudgetExhausted,
        };
        AdvanceResult { simulated_frames: frames, stop_reason }
    }

    /// Fire first from the current position, then move.
    fn resolve_human_intent(&mut self, intent: &HumanIntent) {
        let human = &mut self.agents[self.human_id];
        if !human.alive {
            return;
        }
        if let Some(aim) = intent.fire_at
            && human.try_consume_ammo()
        {
            let projectile =
                Projectile::aimed(human.pos(), aim, ProjectileOwner::Human, &self.config.projectile);
            self.projectiles.insert(projectile);
            self.log.push(ArenaEvent::ProjectileFired {
                owner: ProjectileOwner::Human,
                ricochet: false,
            });
        }
        human.walk(
            intent,
            self.maze.walls(),
            &self.maze.world_bounds(),
            self.config.human.bounds_margin,
        );
    }

    fn run_autonomous_agents(&mut self) {
        let ids: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, agent)| agent.kind() == AgentKind::Autonomous)
            .map(|(id, _)| id)
            .collect();
        let ctx =
            PolicyContext { maze: &self.maze, config: &self.config.ai, dt: self.config.frame_dt };

        for id in ids {
            if !self.agents[id].alive {
                continue;
            }
            let contenders: Vec<Contender> = self
                .agents
                .iter()
                .filter(|(other, agent)| *other != id && agent.alive)
                .map(|(other, agent)| Contender { id: other, pos: agent.pos(), kind: agent.kind() })
                .collect();

            let Agent { body, controller, .. } = &mut self.agents[id];
            let Controller::Autonomous(brain) = controller else {
                continue;
            };
            let decision = ai::think(id, body, brain, &contenders, &ctx, &mut self.rng);

            if let Some(state) = decision.state_change {
                debug!(agent = ?id, ?state, "behavior_changed");
                self.log.push(ArenaEvent::BehaviorChanged { agent: id, state });
            }
            if let Some(order) = decision.fire {
                let owner = ProjectileOwner::Agent(id);
                let projectile =
                    Projectile::aimed(body.pos, order.aim, owner, &self.config.projectile);
                self.projectiles.insert(projectile);
                self.log.push(ArenaEvent::ProjectileFired { owner, ricochet: order.ricochet });
            }
        }
    }

    fn advance_projectiles(&mut self) {
        let world = self.maze.world_bounds();
        for projectile in self.projectiles.values_mut() {
            let step = projectile.advance(self.maze.walls(), &world, &self.config.projectile);
            if let ProjectileStep::Expired(reason) = step {
                self.log.push(ArenaEvent::ProjectileExpired { owner: projectile.owner, reason });
            }
        }
    }

    fn resolve_combat(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        for hit in resolve_hits(&mut self.agents, &mut self.projectiles) {
            report.hits += 1;
            self.log
                .push(ArenaEvent::ProjectileExpired { owner: hit.owner, reason: ExpireReason::Hit });
            self.log.push(ArenaEvent::AgentHit {
                agent: hit.agent,
                owner: hit.owner,
                damage: hit.damage,
            });
            if !hit.eliminated {
                continue;
            }

            report.eliminated.push(hit.agent);
            self.log.push(ArenaEvent::AgentEliminated { agent: hit.agent, kind: hit.kind });
            info!(agent = ?hit.agent, kind = ?hit.kind, frame = self.frame, "agent_eliminated");

            if hit.kind == AgentKind::Autonomous {
                let at = self.agents[hit.agent].pos();
                if let Some(pickup) = roll_drop(at, &self.config.pickups, &mut self.rng) {
                    self.log.push(ArenaEvent::PickupDropped { kind: pickup.kind, pos: pickup.pos });
                    self.pickups.insert(pickup);
                }
            }
        }
        report
    }

    fn resolve_pickups(&mut self) {
        let human = &mut self.agents[self.human_id];
        for kind in collect(human, &mut self.pickups, &self.config.pickups) {
            self.log.push(ArenaEvent::PickupCollected { kind });
        }
    }

    /// Decides the match once at most one contender is left standing.
    fn check_winner(&mut self) -> Option<Winner> {
        if self.winner.is_some() {
            return self.winner;
        }
        let mut survivors = self.agents.values().filter(|agent| agent.alive);
        let first = survivors.next();
        if survivors.next().is_some() {
            return None;
        }

        let winner = match first.map(Agent::kind) {
            Some(AgentKind::Human) => Winner::Human,
            Some(AgentKind::Autonomous) => Winner::Autonomous,
            None => Winner::Nobody,
        };
        self.winner = Some(winner);
        self.log.push(ArenaEvent::MatchFinished { winner, frame: self.frame });
        info!(?winner, frame = self.frame, seed = self.seed, "match_finished");
        Some(winner)
    }
}
