//! Axis-aligned world rectangles used for walls, bodies and probes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self { x: center.x - size.x / 2.0, y: center.y - size.y / 2.0, w: size.x, h: size.y }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlap depth along each axis, zero when separated on that axis.
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        let x = (self.right().min(other.right()) - self.left().max(other.left())).max(0.0);
        let y = (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0);
        Vec2::new(x, y)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        (self.left()..=self.right()).contains(&point.x)
            && (self.top()..=self.bottom()).contains(&point.y)
    }

    pub fn contained_in(&self, bounds: &Rect) -> bool {
        self.left() >= bounds.left()
            && self.top() >= bounds.top()
            && self.right() <= bounds.right()
            && self.bottom() <= bounds.bottom()
    }
}
