//! Shared fixtures for the `arena` test suite.
//! Fixtures use open mazes with hand-placed agents so outcomes do not depend on generation.

use glam::Vec2;

use super::*;

pub(super) const DUEL_HUMAN_CELL: Cell = Cell::new(2, 3);
pub(super) const DUEL_BOT_CELL: Cell = Cell::new(8, 3);

pub(super) fn open_maze() -> Maze {
    Maze::open(12, 8, 40.0)
}

pub(super) fn layout(human: Cell, bots: &[Cell], pickups: Vec<Pickup>) -> ArenaLayout {
    let maze = open_maze();
    ArenaLayout {
        human: maze.cell_center(human),
        autonomous: bots.iter().map(|cell| maze.cell_center(*cell)).collect(),
        pickups,
        maze,
    }
}

/// Human and one autonomous agent on the same row of an open maze, six cells apart.
pub(super) fn duel(config: ArenaConfig) -> (Arena, AgentId) {
    let layout = layout(DUEL_HUMAN_CELL, &[DUEL_BOT_CELL], Vec::new());
    let arena = Arena::with_layout(7, config, layout).expect("fixture config is valid");
    let bot = arena
        .autonomous_agents()
        .map(|agent| agent.id)
        .next()
        .expect("duel has one autonomous agent");
    (arena, bot)
}

pub(super) fn cell_center(cell: Cell) -> Vec2 {
    open_maze().cell_center(cell)
}
