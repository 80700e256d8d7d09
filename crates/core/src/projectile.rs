//! Projectile flight with ricochet off wall segments.
//! Motion is a fixed per-frame displacement; velocity magnitudes are tuned for the frame rate.

use glam::Vec2;

use crate::config::ProjectileConfig;
use crate::geometry::Rect;
use crate::maze::WallSegments;
use crate::types::{ExpireReason, ProjectileOwner};

/// Damage carried by projectiles that autonomous agents fire.
///
/// Autonomous fire never reduces health: their shots still register hits and are consumed, but
/// eliminations only ever come from the human. This asymmetry is a rule of the game.
pub const AUTONOMOUS_PROJECTILE_DAMAGE: i32 = 0;

pub fn damage_for(owner: ProjectileOwner, config: &ProjectileConfig) -> i32 {
    match owner {
        ProjectileOwner::Human => config.human_damage,
        ProjectileOwner::Agent(_) => AUTONOMOUS_PROJECTILE_DAMAGE,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: ProjectileOwner,
    pub damage: i32,
    pub radius: f32,
    pub bounces: u32,
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileStep {
    Flying,
    Bounced,
    Expired(ExpireReason),
    /// The projectile was already dead; nothing happened.
    Spent,
}

impl Projectile {
    /// Projectile leaving `origin` towards `target` at the configured speed. A target on top of
    /// the origin has no direction, so the shot falls back to travelling along +x.
    pub fn aimed(
        origin: Vec2,
        target: Vec2,
        owner: ProjectileOwner,
        config: &ProjectileConfig,
    ) -> Self {
        let direction = (target - origin).try_normalize().unwrap_or(Vec2::X);
        Self {
            pos: origin,
            vel: direction * config.speed,
            owner,
            damage: damage_for(owner, config),
            radius: config.radius,
            bounces: 0,
            alive: true,
        }
    }

    pub fn bounds_at(&self, pos: Vec2) -> Rect {
        Rect::centered(pos, Vec2::splat(self.radius * 2.0))
    }

    /// Advance one frame against the wall segments.
    ///
    /// On impact the velocity component along the wall normal is reversed and scaled by the
    /// retention factor. The normal is the axis of SHALLOWER penetration into the segment, which
    /// deliberately departs from flipping on the axis of larger overlap: against a thin wall hit
    /// head-on the larger overlap runs along the wall, and flipping it would keep the projectile
    /// moving into the wall at full speed. The tentative position is discarded and the projectile
    /// is nudged along its new velocity.
    pub fn advance(
        &mut self,
        walls: &WallSegments,
        world: &Rect,
        config: &ProjectileConfig,
    ) -> ProjectileStep {
        if !self.alive {
            return ProjectileStep::Spent;
        }

        let next = self.pos + self.vel;
        let probe = self.bounds_at(next);
        if let Some(wall) = walls.first_hit(&probe) {
            let overlap = probe.overlap(wall);
            if overlap.y <= overlap.x {
                self.vel.y = -self.vel.y * config.bounce_retention;
            } else {
                self.vel.x = -self.vel.x * config.bounce_retention;
            }
            self.bounces += 1;
            if self.bounces >= config.max_bounces {
                return self.expire(ExpireReason::BounceLimit);
            }
            if self.vel.length() < config.min_speed {
                return self.expire(ExpireReason::SpeedFloor);
            }
            self.pos += self.vel * config.bounce_nudge;
            return ProjectileStep::Bounced;
        }

        self.pos = next;
        let margin = config.out_of_bounds_margin;
        if self.pos.x < world.left() - margin
            || self.pos.x > world.right() + margin
            || self.pos.y < world.top() - margin
            || self.pos.y > world.bottom() + margin
        {
            return self.expire(ExpireReason::OutOfBounds);
        }
        ProjectileStep::Flying
    }

    fn expire(&mut self, reason: ExpireReason) -> ProjectileStep {
        self.alive = false;
        ProjectileStep::Expired(reason)
    }
}
