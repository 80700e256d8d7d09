//! Autonomous agent policy: target acquisition, wander and pursuit movement, and the fire
//! decision with its direct and ricochet variants.

use std::collections::VecDeque;

use glam::Vec2;
use tracing::debug;

use crate::agent::Body;
use crate::config::AiConfig;
use crate::maze::Maze;
use crate::pathfinding::find_path;
use crate::rng::ArenaRng;
use crate::sight::{has_line_of_sight, ricochet_aim_point};
use crate::types::{AgentId, AgentKind, BehaviorState, Cell};

/// Per-agent policy state.
#[derive(Clone, Debug, PartialEq)]
pub struct Brain {
    /// Remaining cells to walk, consumed from the front.
    pub path: VecDeque<Cell>,
    /// Seconds until the pursuit path is recomputed.
    pub path_timer: f32,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
    pub state: BehaviorState,
}

impl Brain {
    pub fn new(fire_cooldown: f32) -> Self {
        Self {
            path: VecDeque::new(),
            path_timer: 0.0,
            fire_cooldown,
            state: BehaviorState::Wandering,
        }
    }

    /// Walks towards the centre of the next path cell and pops it once within `arrival_radius`.
    /// Path following does not collide with walls.
    fn follow_path(&mut self, body: &mut Body, maze: &Maze, arrival_radius: f32) {
        let Some(&next) = self.path.front() else {
            return;
        };
        let offset = maze.cell_center(next) - body.pos;
        let distance = offset.length();
        if distance > 0.0 {
            body.pos += offset / distance * body.speed.min(distance);
        }
        if distance < arrival_radius {
            self.path.pop_front();
        }
    }

    fn replan(&mut self, maze: &Maze, from: Cell, to: Cell) {
        self.path = find_path(maze.grid(), from, to).into();
        if self.path.front() == Some(&from) {
            self.path.pop_front();
        }
    }
}

/// Another live agent as seen by the policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contender {
    pub id: AgentId,
    pub pos: Vec2,
    pub kind: AgentKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireOrder {
    pub aim: Vec2,
    pub ricochet: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Decision {
    pub fire: Option<FireOrder>,
    /// New behaviour state, when it changed this frame.
    pub state_change: Option<BehaviorState>,
}

pub struct PolicyContext<'a> {
    pub maze: &'a Maze,
    pub config: &'a AiConfig,
    pub dt: f32,
}

pub fn nearest(pos: Vec2, contenders: &[Contender]) -> Option<Contender> {
    contenders.iter().copied().fold(None, |best: Option<Contender>, candidate| match best {
        Some(current) if current.pos.distance(pos) <= candidate.pos.distance(pos) => Some(current),
        _ => Some(candidate),
    })
}

/// One frame of an autonomous agent: move `body`, update `brain`, and decide whether to fire.
/// `contenders` are the other live agents. The world edge carries no wall segments, so the body
/// is clamped back inside the world after every move.
pub fn think(
    id: AgentId,
    body: &mut Body,
    brain: &mut Brain,
    contenders: &[Contender],
    ctx: &PolicyContext<'_>,
    rng: &mut ArenaRng,
) -> Decision {
    let mut decision = Decision::default();
    let Some(target) = nearest(body.pos, contenders) else {
        decision.state_change = transition(brain, BehaviorState::Wandering);
        wander(body, brain, ctx, rng);
        keep_inside(body, ctx);
        return decision;
    };
    decision.state_change = transition(brain, BehaviorState::Pursuing);
    let distance = body.pos.distance(target.pos);

    pursue(body, brain, target.pos, ctx, rng);
    keep_inside(body, ctx);

    brain.fire_cooldown -= ctx.dt;
    if distance < ctx.config.fire_range && brain.fire_cooldown <= 0.0 {
        decision.fire = choose_shot(body.pos, brain, target, distance, ctx, rng);
    }
    if let Some(order) = decision.fire {
        debug!(agent = ?id, target = ?target.id, ricochet = order.ricochet, "agent_fired");
    }
    decision
}

fn keep_inside(body: &mut Body, ctx: &PolicyContext<'_>) {
    body.clamp_to(&ctx.maze.world_bounds(), ctx.config.bounds_margin);
}

fn transition(brain: &mut Brain, state: BehaviorState) -> Option<BehaviorState> {
    if brain.state == state {
        return None;
    }
    brain.state = state;
    Some(state)
}

fn wander(body: &mut Body, brain: &mut Brain, ctx: &PolicyContext<'_>, rng: &mut ArenaRng) {
    let config = ctx.config;
    if rng.chance(config.wander_chance) {
        let offset = Vec2::new(
            rng.range_f32(-config.wander_radius, config.wander_radius),
            rng.range_f32(-config.wander_radius, config.wander_radius),
        );
        let mut goal = Body { pos: body.pos + offset, ..*body };
        goal.clamp_to(&ctx.maze.world_bounds(), config.wander_margin);
        let from = ctx.maze.cell_at(body.pos);
        brain.replan(ctx.maze, from, ctx.maze.cell_at(goal.pos));
    }
    brain.follow_path(body, ctx.maze, config.arrival_radius);
}

fn pursue(
    body: &mut Body,
    brain: &mut Brain,
    target: Vec2,
    ctx: &PolicyContext<'_>,
    rng: &mut ArenaRng,
) {
    brain.path_timer -= ctx.dt;
    if brain.path_timer <= 0.0 {
        brain.path_timer = rng.seconds(ctx.config.path_refresh);
        let from = ctx.maze.cell_at(body.pos);
        brain.replan(ctx.maze, from, ctx.maze.cell_at(target));
    }

    if brain.path.is_empty() {
        body.steer_towards(target, ctx.maze.walls());
    } else {
        brain.follow_path(body, ctx.maze, ctx.config.arrival_radius);
    }
}

/// Direct shot when the line is clear; otherwise a ricochet, but only at another autonomous agent
/// inside ricochet range and only when a wall qualifies as a bounce surface.
fn choose_shot(
    shooter: Vec2,
    brain: &mut Brain,
    target: Contender,
    distance: f32,
    ctx: &PolicyContext<'_>,
    rng: &mut ArenaRng,
) -> Option<FireOrder> {
    let config = ctx.config;
    let walls = ctx.maze.walls();
    if has_line_of_sight(walls, shooter, target.pos, config.sight_spacing, config.sight_probe_size) {
        let aim = target.pos
            + Vec2::new(
                rng.range_f32(-config.aim_jitter, config.aim_jitter),
                rng.range_f32(-config.aim_jitter, config.aim_jitter),
            );
        brain.fire_cooldown = rng.seconds(config.direct_cooldown);
        return Some(FireOrder { aim, ricochet: false });
    }

    if target.kind != AgentKind::Autonomous || distance >= config.ricochet_range {
        return None;
    }
    let aim = ricochet_aim_point(
        walls,
        shooter,
        target.pos,
        config.ricochet_max_offset,
        config.ricochet_jitter,
        rng,
    )?;
    brain.fire_cooldown = rng.seconds(config.ricochet_cooldown);
    Some(FireOrder { aim, ricochet: true })
}
