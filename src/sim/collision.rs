//! Hit regions and overlap testing
//!
//! The simulation never talks to a physics engine. Entities describe the
//! area they occupy as a [`HitRegion`] and a [`CollisionChecker`] decides
//! whether two regions touch. [`GeometricOverlap`] is the built-in checker.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Geometric area used for collision tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitRegion {
    /// Disc around a centre point
    Circle { center: Vec2, radius: f32 },
    /// Axis-aligned rectangle
    Aabb { min: Vec2, max: Vec2 },
}

impl HitRegion {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        HitRegion::Circle { center, radius }
    }

    /// Axis-aligned box centred on `center` with the given half extents
    pub fn aabb(center: Vec2, half_extents: Vec2) -> Self {
        HitRegion::Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
}

/// Capability to decide whether two hit regions overlap
pub trait CollisionChecker {
    fn overlaps(&self, a: &HitRegion, b: &HitRegion) -> bool;
}

/// Circle/AABB intersection tests
///
/// Touching shapes (distance exactly equal to the sum of radii) count as
/// overlapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricOverlap;

impl CollisionChecker for GeometricOverlap {
    fn overlaps(&self, a: &HitRegion, b: &HitRegion) -> bool {
        match (*a, *b) {
            (
                HitRegion::Circle { center: ca, radius: ra },
                HitRegion::Circle { center: cb, radius: rb },
            ) => circles_overlap(ca, ra, cb, rb),
            (HitRegion::Circle { center, radius }, HitRegion::Aabb { min, max })
            | (HitRegion::Aabb { min, max }, HitRegion::Circle { center, radius }) => {
                circle_aabb_overlap(center, radius, min, max)
            }
            (
                HitRegion::Aabb { min: amin, max: amax },
                HitRegion::Aabb { min: bmin, max: bmax },
            ) => amin.x <= bmax.x && amax.x >= bmin.x && amin.y <= bmax.y && amax.y >= bmin.y,
        }
    }
}

#[inline]
fn circles_overlap(ca: Vec2, ra: f32, cb: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    ca.distance_squared(cb) <= reach * reach
}

#[inline]
fn circle_aabb_overlap(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    // Closest point on the box to the circle centre
    let closest = center.clamp(min, max);
    center.distance_squared(closest) <= radius * radius
}
