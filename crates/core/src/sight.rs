//! Line-of-sight sampling and the ricochet aim heuristic, both answered from wall segments alone.

use glam::Vec2;

use crate::geometry::Rect;
use crate::maze::WallSegments;
use crate::rng::ArenaRng;

/// Samples the open segment between `from` and `to` every `spacing` units and probes each sample
/// with a `probe_size` square. The endpoints themselves are not probed.
pub fn has_line_of_sight(
    walls: &WallSegments,
    from: Vec2,
    to: Vec2,
    spacing: f32,
    probe_size: f32,
) -> bool {
    let distance = from.distance(to);
    let steps = (distance / spacing) as u32 + 1;
    let probe = Vec2::splat(probe_size);
    (1..steps).all(|i| {
        let t = i as f32 / steps as f32;
        !walls.blocks(&Rect::centered(from.lerp(to, t), probe))
    })
}

/// Wall centre closest to the shooter-target line, jittered by up to `jitter` on each axis.
///
/// Only segments whose centre projects strictly inside the segment between the two points and lies
/// within `max_offset` of it qualify. Ties go to the earlier segment. This is an aim heuristic; it
/// does not trace the reflected trajectory.
pub fn ricochet_aim_point(
    walls: &WallSegments,
    shooter: Vec2,
    target: Vec2,
    max_offset: f32,
    jitter: f32,
    rng: &mut ArenaRng,
) -> Option<Vec2> {
    let line = target - shooter;
    let length_sq = line.length_squared();
    if length_sq == 0.0 {
        return None;
    }

    let mut best: Option<(f32, Vec2)> = None;
    for wall in walls.iter() {
        let center = wall.center();
        let t = (center - shooter).dot(line) / length_sq;
        if t <= 0.0 || t >= 1.0 {
            continue;
        }
        let offset = center.distance(shooter + line * t);
        if offset < max_offset && best.is_none_or(|(closest, _)| offset < closest) {
            best = Some((offset, center));
        }
    }

    let (_, center) = best?;
    let dx = rng.range_f32(-jitter, jitter);
    let dy = rng.range_f32(-jitter, jitter);
    Some(center + Vec2::new(dx, dy))
}
