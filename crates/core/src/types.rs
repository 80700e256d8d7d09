use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct AgentId;
    pub struct ProjectileId;
    pub struct PickupId;
}

/// Grid coordinate of one maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn step(self, side: Side) -> Self {
        match side {
            Side::Top => Self { col: self.col, row: self.row - 1 },
            Side::Right => Self { col: self.col + 1, row: self.row },
            Side::Bottom => Self { col: self.col, row: self.row + 1 },
            Side::Left => Self { col: self.col - 1, row: self.row },
        }
    }
}

/// Cell edge. The discriminant is the wall-flag index (top=0, right=1, bottom=2, left=3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    Human,
    Autonomous,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    Wandering,
    Pursuing,
}

/// Who fired a projectile. Drives both the damage rule and presentation colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Human,
    Agent(AgentId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Ammo,
    Medkit,
}

/// Side that won the match. `Nobody` when the last contenders fall in the same frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Human,
    Autonomous,
    Nobody,
}

/// Per-frame intent produced by the human input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanIntent {
    /// Horizontal axis intent in {-1, 0, 1}.
    pub move_x: i8,
    /// Vertical axis intent in {-1, 0, 1}; positive is down.
    pub move_y: i8,
    /// World point to fire at this frame, if any.
    pub fire_at: Option<Vec2>,
}

impl HumanIntent {
    pub const IDLE: Self = Self { move_x: 0, move_y: 0, fire_at: None };

    pub fn moving(move_x: i8, move_y: i8) -> Self {
        Self { move_x: move_x.signum(), move_y: move_y.signum(), fire_at: None }
    }

    pub fn firing_at(target: Vec2) -> Self {
        Self { fire_at: Some(target), ..Self::IDLE }
    }

    pub fn is_idle(&self) -> bool {
        self.move_x == 0 && self.move_y == 0 && self.fire_at.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpireReason {
    BounceLimit,
    SpeedFloor,
    OutOfBounds,
    Hit,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ArenaEvent {
    ProjectileFired { owner: ProjectileOwner, ricochet: bool },
    ProjectileExpired { owner: ProjectileOwner, reason: ExpireReason },
    AgentHit { agent: AgentId, owner: ProjectileOwner, damage: i32 },
    AgentEliminated { agent: AgentId, kind: AgentKind },
    BehaviorChanged { agent: AgentId, state: BehaviorState },
    PickupDropped { kind: PickupKind, pos: Vec2 },
    PickupCollected { kind: PickupKind },
    MatchFinished { winner: Winner, frame: u64 },
}

/// Summary of one simulated frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub hits: u32,
    pub eliminated: Vec<AgentId>,
    pub winner: Option<Winner>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Finished(Winner),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_frames: u32,
    pub stop_reason: AdvanceStopReason,
}
