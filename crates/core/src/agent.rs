//! Contenders in the arena. Every agent shares a body and health record; what varies is the
//! controller, which is either the externally driven human or an autonomous brain.

use glam::Vec2;

use crate::ai::Brain;
use crate::geometry::Rect;
use crate::maze::{Maze, WallSegments};
use crate::types::{AgentId, AgentKind, BehaviorState, Cell, HumanIntent};

/// Square collision body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    /// Full edge length of the bounding square.
    pub size: f32,
    /// World units per frame.
    pub speed: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Self {
        Self { pos, size, speed }
    }

    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    pub fn bounds(&self) -> Rect {
        self.bounds_at(self.pos)
    }

    pub fn bounds_at(&self, pos: Vec2) -> Rect {
        Rect::centered(pos, Vec2::splat(self.size))
    }

    /// Applies `delta` one axis at a time, dropping each axis whose move would overlap a wall.
    /// Blocked on one axis, the body still slides along the other.
    pub fn slide(&mut self, delta: Vec2, walls: &WallSegments) {
        let moved_x = Vec2::new(self.pos.x + delta.x, self.pos.y);
        if delta.x != 0.0 && !walls.blocks(&self.bounds_at(moved_x)) {
            self.pos = moved_x;
        }
        let moved_y = Vec2::new(self.pos.x, self.pos.y + delta.y);
        if delta.y != 0.0 && !walls.blocks(&self.bounds_at(moved_y)) {
            self.pos = moved_y;
        }
    }

    /// Sliding move towards `target` at full speed, stopping on it when it is closer than one
    /// step. Coincident points leave the body in place.
    pub fn steer_towards(&mut self, target: Vec2, walls: &WallSegments) {
        let offset = target - self.pos;
        let step = offset.length().min(self.speed);
        self.slide(offset.normalize_or_zero() * step, walls);
    }

    pub fn clamp_to(&mut self, world: &Rect, margin: f32) {
        self.pos.x = self.pos.x.clamp(world.left() + margin, world.right() - margin);
        self.pos.y = self.pos.y.clamp(world.top() + margin, world.bottom() - margin);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Controller {
    Human { ammo: u32 },
    Autonomous(Brain),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id: AgentId,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub controller: Controller,
}

impl Agent {
    pub fn human(id: AgentId, body: Body, max_health: i32, ammo: u32) -> Self {
        Self {
            id,
            body,
            health: max_health,
            max_health,
            alive: true,
            controller: Controller::Human { ammo },
        }
    }

    pub fn autonomous(id: AgentId, body: Body, max_health: i32, brain: Brain) -> Self {
        Self {
            id,
            body,
            health: max_health,
            max_health,
            alive: true,
            controller: Controller::Autonomous(brain),
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self.controller {
            Controller::Human { .. } => AgentKind::Human,
            Controller::Autonomous(_) => AgentKind::Autonomous,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn cell(&self, maze: &Maze) -> Cell {
        maze.cell_at(self.body.pos)
    }

    pub fn ammo(&self) -> Option<u32> {
        match self.controller {
            Controller::Human { ammo } => Some(ammo),
            Controller::Autonomous(_) => None,
        }
    }

    pub fn behavior(&self) -> Option<BehaviorState> {
        match &self.controller {
            Controller::Human { .. } => None,
            Controller::Autonomous(brain) => Some(brain.state),
        }
    }

    /// Health floored at zero, as presented to observers.
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }

    /// Subtracts `amount` from a live agent. Returns `true` on the hit that kills it; dead agents
    /// are left untouched.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: i32) {
        if self.alive {
            self.health = (self.health + amount).min(self.max_health);
        }
    }

    /// Moves a live agent by a human axis intent, normalized so diagonals are not faster, then
    /// clamps it inside the world with `margin`.
    pub fn walk(&mut self, intent: &HumanIntent, walls: &WallSegments, world: &Rect, margin: f32) {
        let axes = Vec2::new(f32::from(intent.move_x.signum()), f32::from(intent.move_y.signum()));
        if !self.alive || axes == Vec2::ZERO {
            return;
        }
        self.body.slide(axes.normalize() * self.body.speed, walls);
        self.body.clamp_to(world, margin);
    }

    /// Spends one round if this is a live human with ammo left.
    pub fn try_consume_ammo(&mut self) -> bool {
        match &mut self.controller {
            Controller::Human { ammo } if self.alive && *ammo > 0 => {
                *ammo -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn add_ammo(&mut self, amount: u32) {
        if let Controller::Human { ammo } = &mut self.controller {
            *ammo = ammo.saturating_add(amount);
        }
    }
}
