use std::collections::BTreeSet;

use anyhow::{Result, ensure};
use arena_core::{AdvanceStopReason, Arena, ArenaConfig, HumanAutopilot};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 6_000)]
    frames: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} frames...", args.seed, args.frames);
    let config = ArenaConfig::default();
    let max_bounces = config.projectile.max_bounces;
    let mut arena = Arena::new(args.seed, config)?;
    let mut autopilot = HumanAutopilot::default();

    let world = arena.maze().world_bounds();
    for wall in arena.maze().walls().iter() {
        ensure!(wall.contained_in(&world), "Invariant failed: wall {wall:?} outside the world");
    }

    let mut dead = BTreeSet::new();
    while arena.frame() < args.frames {
        let intent = autopilot.next_intent(&arena);
        let result = arena.advance(1, &intent);

        for agent in arena.agents() {
            ensure!(agent.health <= agent.max_health, "Invariant failed: health > max health");
            ensure!(
                !(dead.contains(&agent.id) && agent.alive),
                "Invariant failed: eliminated agent came back at frame {}",
                arena.frame()
            );
            ensure!(
                world.contains_point(agent.pos()),
                "Invariant failed: agent left the world at frame {}",
                arena.frame()
            );
            if !agent.alive {
                dead.insert(agent.id);
            }
        }
        for projectile in arena.projectiles() {
            ensure!(
                projectile.bounces < max_bounces,
                "Invariant failed: projectile past its bounce cap"
            );
        }

        if let AdvanceStopReason::Finished(winner) = result.stop_reason {
            println!("Finished with winner {:?} after {} frames", winner, arena.frame());
            break;
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
