//! Ammo and medkit pickups: placement, loot drops and collection by the human.

use glam::Vec2;
use serde::Serialize;
use slotmap::SlotMap;

use crate::agent::Agent;
use crate::config::PickupConfig;
use crate::rng::ArenaRng;
use crate::types::{PickupId, PickupKind};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: PickupKind,
}

pub fn random_kind(rng: &mut ArenaRng) -> PickupKind {
    if rng.chance(0.5) { PickupKind::Ammo } else { PickupKind::Medkit }
}

/// Loot left by an eliminated agent: rolls the drop chance, then scatters a pickup of random
/// kind around `at`.
pub fn roll_drop(at: Vec2, config: &PickupConfig, rng: &mut ArenaRng) -> Option<Pickup> {
    if !rng.chance(config.drop_chance) {
        return None;
    }
    let scatter = config.drop_scatter.abs();
    let dx = rng.range_i32(-scatter, scatter) as f32;
    let dy = rng.range_i32(-scatter, scatter) as f32;
    Some(Pickup { pos: at + Vec2::new(dx, dy), kind: random_kind(rng) })
}

/// Applies and removes every pickup within reach of a live `collector`, in map order.
pub fn collect(
    collector: &mut Agent,
    pickups: &mut SlotMap<PickupId, Pickup>,
    config: &PickupConfig,
) -> Vec<PickupKind> {
    let mut collected = Vec::new();
    if !collector.alive {
        return collected;
    }
    let reach = config.radius;
    let pos = collector.pos();
    pickups.retain(|_, pickup| {
        if pickup.pos.distance(pos) >= reach {
            return true;
        }
        match pickup.kind {
            PickupKind::Medkit => collector.heal(config.medkit_heal),
            PickupKind::Ammo => collector.add_ammo(config.ammo_amount),
        }
        collected.push(pickup.kind);
        false
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Body;
    use crate::types::AgentId;

    fn human() -> Agent {
        Agent::human(AgentId::default(), Body::new(Vec2::new(100.0, 100.0), 28.0, 2.6), 100, 0)
    }

    #[test]
    fn nearby_pickups_are_applied_and_removed() {
        let config = PickupConfig::default();
        let mut human = human();
        human.apply_damage(70);
        let mut pickups: SlotMap<PickupId, Pickup> = SlotMap::with_key();
        pickups.insert(Pickup { pos: Vec2::new(110.0, 100.0), kind: PickupKind::Medkit });
        pickups.insert(Pickup { pos: Vec2::new(100.0, 117.0), kind: PickupKind::Ammo });
        pickups.insert(Pickup { pos: Vec2::new(100.0, 118.0), kind: PickupKind::Ammo });

        let collected = collect(&mut human, &mut pickups, &config);

        assert_eq!(collected, vec![PickupKind::Medkit, PickupKind::Ammo]);
        assert_eq!(human.health, 70);
        assert_eq!(human.ammo(), Some(10));
        assert_eq!(pickups.len(), 1, "the pickup at exactly the radius stays");
    }

    #[test]
    fn dead_collector_takes_nothing() {
        let config = PickupConfig::default();
        let mut human = human();
        human.apply_damage(500);
        let mut pickups: SlotMap<PickupId, Pickup> = SlotMap::with_key();
        pickups.insert(Pickup { pos: Vec2::new(100.0, 100.0), kind: PickupKind::Ammo });
        assert!(collect(&mut human, &mut pickups, &config).is_empty());
        assert_eq!(pickups.len(), 1);
    }

    #[test]
    fn drops_respect_chance_and_scatter() {
        let mut rng = ArenaRng::seed_from_u64(8);
        let always = PickupConfig { drop_chance: 1.0, ..PickupConfig::default() };
        let never = PickupConfig { drop_chance: 0.0, ..PickupConfig::default() };
        let at = Vec2::new(300.0, 300.0);
        for _ in 0..50 {
            let pickup = roll_drop(at, &always, &mut rng).expect("drop chance is one");
            let offset = pickup.pos - at;
            assert!(offset.x.abs() <= 10.0 && offset.y.abs() <= 10.0);
            assert_eq!(offset.x.fract(), 0.0);
            assert_eq!(roll_drop(at, &never, &mut rng), None);
        }
    }
}
