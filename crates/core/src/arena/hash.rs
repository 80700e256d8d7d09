//! Stable snapshot hashing for deterministic verification.
//! Floats are hashed by bit pattern, so equal hashes mean bit-identical state.

use std::hash::Hasher;

use glam::Vec2;
use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::agent::Controller;

fn write_vec2(hasher: &mut Xxh3, value: Vec2) {
    hasher.write_u32(value.x.to_bits());
    hasher.write_u32(value.y.to_bits());
}

fn owner_tag(owner: ProjectileOwner) -> u8 {
    match owner {
        ProjectileOwner::Human => 0,
        ProjectileOwner::Agent(_) => 1,
    }
}

impl Arena {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.frame);

        for agent in self.agents.values() {
            write_vec2(&mut hasher, agent.pos());
            hasher.write_i32(agent.health);
            hasher.write_u8(u8::from(agent.alive));
            match &agent.controller {
                Controller::Human { ammo } => hasher.write_u32(*ammo),
                Controller::Autonomous(brain) => {
                    hasher.write_u32(brain.fire_cooldown.to_bits());
                    hasher.write_u32(brain.path_timer.to_bits());
                    hasher.write_usize(brain.path.len());
                    hasher.write_u8(brain.state as u8);
                }
            }
        }

        hasher.write_usize(self.projectiles.len());
        for projectile in self.projectiles.values() {
            write_vec2(&mut hasher, projectile.pos);
            write_vec2(&mut hasher, projectile.vel);
            hasher.write_u8(owner_tag(projectile.owner));
            hasher.write_u32(projectile.bounces);
        }

        hasher.write_usize(self.pickups.len());
        for pickup in self.pickups.values() {
            write_vec2(&mut hasher, pickup.pos);
            hasher.write_u8(pickup.kind as u8);
        }

        hasher.write_u8(match self.winner {
            None => 0,
            Some(Winner::Human) => 1,
            Some(Winner::Autonomous) => 2,
            Some(Winner::Nobody) => 3,
        });
        hasher.finish()
    }
}
