//! Intersection tests for oriented rectangles
//!
//! Separating-axis test over the two local axes of each rectangle. Touching
//! edges do not count as an intersection: clearance checks must never report
//! a blocker that only grazes the moving tile.

use glam::Vec2;

use super::rect::OrientedRect;

/// Check whether two oriented rectangles overlap
///
/// Two axis-aligned rectangles take the interval path directly, so the result
/// is identical to comparing `[center ± half_extent]` on both axes.
pub fn intersects(a: &OrientedRect, b: &OrientedRect) -> bool {
    if a.is_axis_aligned() && b.is_axis_aligned() {
        return aabb_overlap(a, b);
    }
    sat_overlap(a, b)
}

/// Interval overlap of the unrotated rectangles on both axes (strict)
#[inline]
pub fn aabb_overlap(a: &OrientedRect, b: &OrientedRect) -> bool {
    let (a_min, a_max) = (a.center - a.half_extents, a.center + a.half_extents);
    let (b_min, b_max) = (b.center - b.half_extents, b.center + b.half_extents);
    a_max.x > b_min.x && b_max.x > a_min.x && a_max.y > b_min.y && b_max.y > a_min.y
}

/// Full separating-axis test, valid for any rotation
pub(crate) fn sat_overlap(a: &OrientedRect, b: &OrientedRect) -> bool {
    let delta = b.center - a.center;
    let a_axes = a.axes();
    let b_axes = b.axes();

    for axis in a_axes.into_iter().chain(b_axes) {
        let separation = delta.dot(axis).abs();
        let reach = extent_on(axis, a.half_extents, a_axes) + extent_on(axis, b.half_extents, b_axes);
        if separation >= reach {
            return false;
        }
    }
    true
}

#[inline]
fn extent_on(axis: Vec2, half_extents: Vec2, [local_x, local_y]: [Vec2; 2]) -> f32 {
    (half_extents.x * axis.dot(local_x)).abs() + (half_extents.y * axis.dot(local_y)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn square(x: f32, y: f32, half: f32) -> OrientedRect {
        OrientedRect::axis_aligned(Vec2::new(x, y), Vec2::splat(half))
    }

    #[test]
    fn test_overlapping_squares() {
        assert!(intersects(&square(0.0, 0.0, 10.0), &square(15.0, 5.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        // Right edge of a at x=10, left edge of b at x=10
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        assert!(!intersects(&a, &b));
        assert!(!sat_overlap(&a, &b));
    }

    #[test]
    fn test_rotated_diamond_misses_corner() {
        // Diamond (square rotated 45°) at origin reaches x = ±√2 on the axis
        // but leaves the corner region of an offset square empty.
        let diamond = OrientedRect::new(Vec2::ZERO, Vec2::ONE, FRAC_PI_4);
        let corner = square(1.9, 1.9, 1.0);
        // Projections overlap on the world axes, only the diagonal separates
        assert!(corner.center.x - corner.half_extents.x < 2.0_f32.sqrt());
        assert!(!intersects(&diamond, &corner));
    }

    #[test]
    fn test_rotated_overlap() {
        let a = OrientedRect::new(Vec2::ZERO, Vec2::new(30.0, 5.0), FRAC_PI_4);
        let b = OrientedRect::new(Vec2::new(10.0, 10.0), Vec2::new(30.0, 5.0), -FRAC_PI_4);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = OrientedRect::new(Vec2::ZERO, Vec2::splat(50.0), 0.2);
        let inner = OrientedRect::new(Vec2::new(3.0, -2.0), Vec2::splat(1.0), 1.1);
        assert!(intersects(&outer, &inner));
    }

    fn rect_strategy() -> impl Strategy<Value = OrientedRect> {
        (
            -200.0f32..200.0,
            -200.0f32..200.0,
            0.5f32..80.0,
            0.5f32..80.0,
            -3.2f32..3.2,
        )
            .prop_map(|(x, y, hw, hh, rot)| {
                OrientedRect::new(Vec2::new(x, y), Vec2::new(hw, hh), rot)
            })
    }

    fn aligned_strategy() -> impl Strategy<Value = OrientedRect> {
        (-200.0f32..200.0, -200.0f32..200.0, 0.5f32..80.0, 0.5f32..80.0)
            .prop_map(|(x, y, hw, hh)| OrientedRect::axis_aligned(Vec2::new(x, y), Vec2::new(hw, hh)))
    }

    fn interval_overlap(a: &OrientedRect, b: &OrientedRect) -> bool {
        let overlap_1d = |ac: f32, ah: f32, bc: f32, bh: f32| ac + ah > bc - bh && bc + bh > ac - ah;
        overlap_1d(a.center.x, a.half_extents.x, b.center.x, b.half_extents.x)
            && overlap_1d(a.center.y, a.half_extents.y, b.center.y, b.half_extents.y)
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_axis_aligned_matches_intervals(a in aligned_strategy(), b in aligned_strategy()) {
            prop_assert_eq!(intersects(&a, &b), interval_overlap(&a, &b));
        }

        // Integer coordinates keep every SAT operation exact, so the general
        // path must agree with the interval test too.
        #[test]
        fn prop_sat_agrees_with_intervals_on_lattice(
            ax in -50i32..50, ay in -50i32..50, ahw in 1i32..20, ahh in 1i32..20,
            bx in -50i32..50, by in -50i32..50, bhw in 1i32..20, bhh in 1i32..20,
        ) {
            let a = OrientedRect::axis_aligned(Vec2::new(ax as f32, ay as f32), Vec2::new(ahw as f32, ahh as f32));
            let b = OrientedRect::axis_aligned(Vec2::new(bx as f32, by as f32), Vec2::new(bhw as f32, bhh as f32));
            prop_assert_eq!(sat_overlap(&a, &b), interval_overlap(&a, &b));
        }
    }
}
