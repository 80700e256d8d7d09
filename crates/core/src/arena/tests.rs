use glam::Vec2;

use super::test_support::*;
use super::*;
use crate::config::ConfigError;

#[test]
fn direct_shot_reduces_target_health_by_exactly_one_damage() {
    let (mut arena, bot) = duel(ArenaConfig::default());
    let aim = arena.agents[bot].pos();

    arena.step(&HumanIntent::firing_at(aim));
    assert_eq!(arena.projectiles().count(), 1);
    for _ in 0..30 {
        if arena.projectiles().count() == 0 {
            break;
        }
        arena.step(&HumanIntent::IDLE);
    }

    assert_eq!(arena.projectiles().count(), 0, "the shot should have landed");
    assert_eq!(arena.agents[bot].health, 75 - 32);
    assert!(arena.log().contains(&ArenaEvent::AgentHit {
        agent: bot,
        owner: ProjectileOwner::Human,
        damage: 32
    }));
    assert!(arena.log().contains(&ArenaEvent::ProjectileExpired {
        owner: ProjectileOwner::Human,
        reason: ExpireReason::Hit
    }));
}

#[test]
fn last_contender_standing_wins_on_next_evaluation() {
    let (mut arena, bot) = duel(ArenaConfig::default());
    assert_eq!(arena.step(&HumanIntent::IDLE).winner, None);

    arena.agents[bot].alive = false;
    let report = arena.step(&HumanIntent::IDLE);

    assert_eq!(report.winner, Some(Winner::Human));
    assert_eq!(arena.winner(), Some(Winner::Human));
    assert_eq!(
        arena.log().last(),
        Some(&ArenaEvent::MatchFinished { winner: Winner::Human, frame: 2 })
    );
}

#[test]
fn finished_match_ignores_further_steps() {
    let (mut arena, bot) = duel(ArenaConfig::default());
    arena.agents[bot].alive = false;
    arena.step(&HumanIntent::IDLE);
    let frame = arena.frame();
    let hash = arena.snapshot_hash();

    let report = arena.step(&HumanIntent::moving(1, 0));

    assert_eq!(report.frame, frame);
    assert_eq!(report.winner, Some(Winner::Human));
    assert_eq!(arena.snapshot_hash(), hash);
}

#[test]
fn surviving_autonomous_agent_wins_for_its_side() {
    let (mut arena, _) = duel(ArenaConfig::default());
    let human = arena.human_id();
    arena.agents[human].alive = false;
    assert_eq!(arena.step(&HumanIntent::IDLE).winner, Some(Winner::Autonomous));
}

#[test]
fn no_survivors_means_nobody_wins() {
    let (mut arena, _) = duel(ArenaConfig::default());
    for agent in arena.agents.values_mut() {
        agent.alive = false;
    }
    assert_eq!(arena.step(&HumanIntent::IDLE).winner, Some(Winner::Nobody));
}

#[test]
fn fire_without_ammo_is_ignored() {
    let mut config = ArenaConfig::default();
    config.human.starting_ammo = 1;
    let (mut arena, bot) = duel(config);
    let aim = arena.agents[bot].pos();

    arena.step(&HumanIntent::firing_at(aim));
    arena.step(&HumanIntent::firing_at(aim));

    let human_shots = arena
        .log()
        .iter()
        .filter(|event| {
            matches!(event, ArenaEvent::ProjectileFired { owner: ProjectileOwner::Human, .. })
        })
        .count();
    assert_eq!(human_shots, 1);
    assert_eq!(arena.human().ammo(), Some(0));
}

#[test]
fn killing_blow_drops_loot_and_finishes_match() {
    let mut config = ArenaConfig::default();
    config.projectile.human_damage = 500;
    config.pickups.drop_chance = 1.0;
    let (mut arena, bot) = duel(config);

    let report = arena.advance(40, &HumanIntent::firing_at(cell_center(DUEL_BOT_CELL)));

    assert_eq!(report.stop_reason, AdvanceStopReason::Finished(Winner::Human));
    assert!(!arena.agents[bot].alive);
    assert!(
        arena
            .log()
            .contains(&ArenaEvent::AgentEliminated { agent: bot, kind: AgentKind::Autonomous })
    );
    assert!(arena.log().iter().any(|event| matches!(event, ArenaEvent::PickupDropped { .. })));
    assert_eq!(arena.live_agent_count(), 1);
}

#[test]
fn human_collects_pickups_in_reach() {
    let pickups = vec![
        Pickup { pos: cell_center(DUEL_HUMAN_CELL) + Vec2::new(5.0, 0.0), kind: PickupKind::Ammo },
        Pickup { pos: cell_center(Cell::new(5, 6)), kind: PickupKind::Medkit },
    ];
    let mut arena = Arena::with_layout(
        3,
        ArenaConfig::default(),
        layout(DUEL_HUMAN_CELL, &[DUEL_BOT_CELL], pickups),
    )
    .expect("fixture config is valid");

    arena.step(&HumanIntent::IDLE);

    assert_eq!(arena.human().ammo(), Some(40));
    assert_eq!(arena.pickups().count(), 1);
    assert!(arena.log().contains(&ArenaEvent::PickupCollected { kind: PickupKind::Ammo }));
}

#[test]
fn advance_reports_budget_exhaustion_while_undecided() {
    let (mut arena, _) = duel(ArenaConfig::default());
    let result = arena.advance(5, &HumanIntent::IDLE);
    assert_eq!(
        result,
        AdvanceResult { simulated_frames: 5, stop_reason: AdvanceStopReason::BudgetExhausted }
    );
    assert_eq!(arena.frame(), 5);
    assert!((arena.elapsed_secs() - 5.0 / 60.0).abs() < 1e-6);
}

#[test]
fn autonomous_agent_closes_in_on_the_human() {
    let (mut arena, bot) = duel(ArenaConfig::default());
    let human = arena.human().pos();
    let start = arena.agents[bot].pos().distance(human);

    arena.advance(30, &HumanIntent::IDLE);

    assert!(arena.agents[bot].pos().distance(human) < start);
    assert_eq!(arena.agents[bot].behavior(), Some(BehaviorState::Pursuing));
    assert!(arena.log().contains(&ArenaEvent::BehaviorChanged {
        agent: bot,
        state: BehaviorState::Pursuing
    }));
}

#[test]
fn generated_match_spawns_configured_population_in_reach() {
    let config = ArenaConfig::default();
    let arena = Arena::new(21, config.clone()).expect("default config is valid");

    assert_eq!(arena.autonomous_agents().count(), config.autonomous.count as usize);
    assert_eq!(arena.pickups().count(), config.pickups.initial_count as usize);
    let world = arena.maze().world_bounds();
    let human_cell = arena.human().cell(arena.maze());
    let reachable = crate::pathfinding::step_distances(arena.maze().grid(), human_cell);
    let spawned_in_reach = reachable.len() > config.autonomous.count as usize;
    for agent in arena.agents() {
        assert!(world.contains_point(agent.pos()));
        if spawned_in_reach {
            assert!(reachable.contains_key(&agent.cell(arena.maze())), "{:?}", agent.pos());
        }
    }
}

#[test]
fn invalid_config_is_rejected_before_generation() {
    let mut config = ArenaConfig::default();
    config.maze.rows = 0;
    assert!(matches!(Arena::new(1, config), Err(ConfigError::EmptyGrid { .. })));
}

#[test]
fn snapshot_exposes_world_for_presentation() {
    let arena = Arena::new(4, ArenaConfig::default()).expect("default config is valid");
    let snapshot = arena.snapshot();

    assert_eq!(snapshot.frame, 0);
    assert_eq!(snapshot.human.kind, AgentKind::Human);
    assert_eq!(snapshot.human.ammo, Some(30));
    assert_eq!(snapshot.agents.len(), 10);
    assert!(snapshot.agents.iter().all(|agent| agent.state == Some(BehaviorState::Wandering)));
    assert_eq!(snapshot.walls.len(), arena.maze().walls().len());
    assert_eq!(snapshot.rooms.len(), 20);
    assert_eq!(snapshot.winner, None);
    let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
    assert!(json.get("walls").is_some_and(|walls| walls.is_array()));
}
