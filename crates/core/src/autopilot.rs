//! Scripted stand-in for the human input layer, used by headless runs and soak tests.

use glam::Vec2;

use crate::arena::Arena;
use crate::maze::{Maze, MoveRule};
use crate::pathfinding::find_path_by;
use crate::sight::has_line_of_sight;
use crate::types::{HumanIntent, PickupKind};

/// Per-axis offset below which the autopilot considers itself aligned with a waypoint.
const AXIS_DEADZONE: f32 = 1.5;

/// Hunts the nearest live autonomous agent: follows a wall-aware route towards it, holds position
/// once it has a clear shot at close range, and fires whenever the refire interval allows. While
/// out of ammo it heads for the nearest ammo pickup instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HumanAutopilot {
    refire_frames: u32,
    frames_until_fire: u32,
}

impl Default for HumanAutopilot {
    fn default() -> Self {
        Self::new(12)
    }
}

impl HumanAutopilot {
    pub fn new(refire_frames: u32) -> Self {
        Self { refire_frames, frames_until_fire: 0 }
    }

    pub fn next_intent(&mut self, arena: &Arena) -> HumanIntent {
        self.frames_until_fire = self.frames_until_fire.saturating_sub(1);
        let human = arena.human();
        if !human.alive || arena.is_finished() {
            return HumanIntent::IDLE;
        }
        let pos = human.pos();
        let Some(target) = arena
            .autonomous_agents()
            .filter(|agent| agent.alive)
            .map(|agent| agent.pos())
            .min_by(|a, b| a.distance(pos).total_cmp(&b.distance(pos)))
        else {
            return HumanIntent::IDLE;
        };

        let ai = &arena.config().ai;
        let maze = arena.maze();
        let ammo = human.ammo().unwrap_or(0);
        let distance = pos.distance(target);
        let in_sight =
            has_line_of_sight(maze.walls(), pos, target, ai.sight_spacing, ai.sight_probe_size);

        let mut intent = HumanIntent::IDLE;
        if ammo > 0 && in_sight && distance < ai.fire_range && self.frames_until_fire == 0 {
            intent.fire_at = Some(target);
            self.frames_until_fire = self.refire_frames;
        }

        if ammo > 0 && in_sight && distance < ai.fire_range / 2.0 {
            return intent;
        }
        let goal = if ammo == 0 { nearest_ammo(arena, pos).unwrap_or(target) } else { target };
        let waypoint = waypoint(maze, pos, goal);
        intent.move_x = axis(waypoint.x - pos.x);
        intent.move_y = axis(waypoint.y - pos.y);
        intent
    }
}

fn nearest_ammo(arena: &Arena, from: Vec2) -> Option<Vec2> {
    arena
        .pickups()
        .filter(|pickup| pickup.kind == PickupKind::Ammo)
        .map(|pickup| pickup.pos)
        .min_by(|a, b| a.distance(from).total_cmp(&b.distance(from)))
}

/// Centre of the next cell on a route the human's body can actually walk, or the goal itself when
/// it shares the current cell or no such route exists.
fn waypoint(maze: &Maze, from: Vec2, goal: Vec2) -> Vec2 {
    let path = find_path_by(maze.grid(), maze.cell_at(from), maze.cell_at(goal), MoveRule::BothEdges);
    path.first().map_or(goal, |cell| maze.cell_center(*cell))
}

fn axis(delta: f32) -> i8 {
    if delta > AXIS_DEADZONE {
        1
    } else if delta < -AXIS_DEADZONE {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaLayout;
    use crate::config::ArenaConfig;
    use crate::types::{Cell, Winner};

    fn open_layout(human: Cell, bots: &[Cell]) -> ArenaLayout {
        let maze = Maze::open(12, 10, 40.0);
        ArenaLayout {
            human: maze.cell_center(human),
            autonomous: bots.iter().map(|cell| maze.cell_center(*cell)).collect(),
            pickups: Vec::new(),
            maze,
        }
    }

    #[test]
    fn fires_at_nearest_agent_in_sight_then_waits_for_refire() {
        let arena = Arena::with_layout(
            1,
            ArenaConfig::default(),
            open_layout(Cell::new(2, 2), &[Cell::new(5, 2), Cell::new(10, 8)]),
        )
        .unwrap();
        let mut autopilot = HumanAutopilot::new(3);

        let first = autopilot.next_intent(&arena);
        assert_eq!(first.fire_at, Some(Vec2::new(220.0, 100.0)));
        assert_eq!((first.move_x, first.move_y), (0, 0), "close enough to hold position");

        assert_eq!(autopilot.next_intent(&arena).fire_at, None);
        assert_eq!(autopilot.next_intent(&arena).fire_at, None);
        assert!(autopilot.next_intent(&arena).fire_at.is_some());
    }

    #[test]
    fn distant_target_is_approached_along_the_route() {
        let arena = Arena::with_layout(
            1,
            ArenaConfig::default(),
            open_layout(Cell::new(1, 1), &[Cell::new(10, 1)]),
        )
        .unwrap();
        let intent = HumanAutopilot::default().next_intent(&arena);
        assert_eq!(intent.fire_at, None, "target is out of range");
        assert_eq!((intent.move_x, intent.move_y), (1, 0));
    }

    #[test]
    fn empty_magazine_heads_for_ammo() {
        let mut config = ArenaConfig::default();
        config.human.starting_ammo = 0;
        let mut layout = open_layout(Cell::new(5, 5), &[Cell::new(5, 7)]);
        layout.pickups.push(crate::pickups::Pickup {
            pos: layout.maze.cell_center(Cell::new(5, 2)),
            kind: PickupKind::Ammo,
        });
        let arena = Arena::with_layout(1, config, layout).unwrap();

        let intent = HumanAutopilot::default().next_intent(&arena);
        assert_eq!(intent.fire_at, None);
        assert_eq!((intent.move_x, intent.move_y), (0, -1));
    }

    #[test]
    fn autopilot_wins_an_open_skirmish() {
        let mut config = ArenaConfig::default();
        config.projectile.human_damage = 500;
        let mut arena = Arena::with_layout(
            9,
            config,
            open_layout(Cell::new(1, 1), &[Cell::new(9, 7), Cell::new(4, 8)]),
        )
        .unwrap();
        let mut autopilot = HumanAutopilot::default();

        while !arena.is_finished() && arena.frame() < 3_000 {
            let intent = autopilot.next_intent(&arena);
            arena.step(&intent);
        }
        assert_eq!(arena.winner(), Some(Winner::Human));
    }
}
