//! Match setup: maze generation, spawn placement and initial pickups.

use glam::Vec2;
use tracing::info;

use super::*;
use crate::agent::Body;
use crate::ai::Brain;
use crate::config::ConfigError;
use crate::maze::MazeBuilder;
use crate::pathfinding::step_distances;
use crate::pickups::random_kind;

/// Explicit starting positions for a match on a prepared maze.
#[derive(Clone, Debug)]
pub struct ArenaLayout {
    pub maze: Maze,
    pub human: Vec2,
    pub autonomous: Vec<Vec2>,
    pub pickups: Vec<Pickup>,
}

impl Arena {
    /// Generates the maze and spawns from `seed`. The same seed and config always produce the
    /// same match.
    pub fn new(seed: u64, config: ArenaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ArenaRng::seed_from_u64(seed);
        let maze = MazeBuilder::new(&config.maze).build(&mut rng);
        let layout = random_layout(maze, &config, &mut rng);
        Ok(Self::assemble(seed, config, rng, layout))
    }

    /// Match on a caller-supplied maze and positions. Randomness (cooldowns, policy, drops) still
    /// flows from `seed`.
    pub fn with_layout(
        seed: u64,
        config: ArenaConfig,
        layout: ArenaLayout,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ArenaRng::seed_from_u64(seed);
        Ok(Self::assemble(seed, config, rng, layout))
    }

    fn assemble(seed: u64, config: ArenaConfig, mut rng: ArenaRng, layout: ArenaLayout) -> Self {
        let ArenaLayout { maze, human, autonomous, pickups: initial_pickups } = layout;

        let mut agents = SlotMap::with_key();
        let human_config = &config.human;
        let human_id = agents.insert_with_key(|id| {
            Agent::human(
                id,
                Body::new(human, human_config.size, human_config.speed),
                human_config.max_health,
                human_config.starting_ammo,
            )
        });
        let bot_config = &config.autonomous;
        for pos in autonomous {
            let brain = Brain::new(rng.seconds(config.ai.initial_cooldown));
            agents.insert_with_key(|id| {
                Agent::autonomous(
                    id,
                    Body::new(pos, bot_config.size, bot_config.speed),
                    bot_config.max_health,
                    brain,
                )
            });
        }

        let mut pickups = SlotMap::with_key();
        for pickup in initial_pickups {
            pickups.insert(pickup);
        }

        info!(
            seed,
            agents = agents.len(),
            pickups = pickups.len(),
            wall_segments = maze.walls().len(),
            "arena_ready"
        );

        Self {
            seed,
            frame: 0,
            rng,
            config,
            maze,
            agents,
            projectiles: SlotMap::with_key(),
            pickups,
            human_id,
            winner: None,
            log: Vec::new(),
        }
    }
}

/// Human at a random cell centre; autonomous agents and pickups at random centres of cells the
/// human can reach, falling back to the whole grid when too few cells are reachable.
fn random_layout(maze: Maze, config: &ArenaConfig, rng: &mut ArenaRng) -> ArenaLayout {
    let all_cells: Vec<Cell> = maze.grid().cells().collect();
    let human_cell = rng.pick(&all_cells).unwrap_or(Cell::new(0, 0));
    let reachable: Vec<Cell> = step_distances(maze.grid(), human_cell).into_keys().collect();
    let pool = if reachable.len() > config.autonomous.count as usize {
        reachable
    } else {
        all_cells
    };

    let autonomous = (0..config.autonomous.count)
        .filter_map(|_| rng.pick(&pool))
        .map(|cell| maze.cell_center(cell))
        .collect();
    let mut pickups = Vec::new();
    for _ in 0..config.pickups.initial_count {
        let Some(cell) = rng.pick(&pool) else {
            break;
        };
        pickups.push(Pickup { pos: maze.cell_center(cell), kind: random_kind(rng) });
    }

    ArenaLayout { human: maze.cell_center(human_cell), autonomous, pickups, maze }
}
