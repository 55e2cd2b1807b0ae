//! # Collision Resolution
//!
//! Pairwise resolution between two overlapping `PhysicalObject`s.
//!
//! Penetration is measured as a directional **breach**: on each axis where the
//! moving object has velocity, how far its leading face has crossed the facing
//! face of the other box. The model assumes an object travels less than its own
//! size per tick. Faster objects can tunnel straight through thin obstacles.

use log::trace;

use crate::maths::{Axis, Vec3};

use super::PhysicalObject;

impl PhysicalObject {
    /// Pushes this object (and `other`, if it is movable) out of an overlap.
    ///
    /// - If this object is frozen or the hitboxes do not overlap, nothing happens.
    /// - If `other` is movable, each object is moved out by half of its own
    ///   breach and the two exchange momentum.
    /// - If `other` is frozen, this object is moved out by its full breach and
    ///   its velocity is zeroed on the axis where the remaining breach is
    ///   smallest, which is taken as the contact normal.
    pub fn fix_collision(&mut self, other: &mut PhysicalObject) {
        if self.frozen || !self.collides_with(other) {
            return;
        }

        if other.frozen {
            self.fix_against_static(other);
        } else {
            self.fix_against_movable(other);
        }
    }

    fn fix_against_static(&mut self, other: &PhysicalObject) {
        let breach = calculate_breach(self, other);
        fix(self, breach);

        // The side of `other` we ended up on is the axis with the smallest
        // breach left after the fix.
        let breach = calculate_breach(self, other);
        if let Some(axis) = contact_axis(self.velocity, breach) {
            let approach = self.velocity[axis.index()];
            self.velocity[axis.index()] = 0.0;
            self.record_contact(axis, approach);
        }
    }

    fn fix_against_movable(&mut self, other: &mut PhysicalObject) {
        let first_breach = calculate_breach(self, other);
        let second_breach = calculate_breach(other, self);

        let first_resolvable = smallest_breach_axis(first_breach).is_some();
        let second_resolvable = smallest_breach_axis(second_breach).is_some();
        let (first_share, second_share) = match (first_resolvable, second_resolvable) {
            (true, true) => (0.5, 0.5),
            (true, false) => (1.0, 0.0),
            (false, true) => (0.0, 1.0),
            (false, false) => (0.0, 0.0),
        };

        let first_axis = fix(self, first_breach * first_share);
        let second_axis = fix(other, second_breach * second_share);

        apply_momentum(self, other);

        if let Some(axis) = first_axis.or(second_axis) {
            match axis {
                Axis::Y if self.hitbox.center.y > other.hitbox.center.y => {
                    self.set_on_ground();
                    other.record_contact(Axis::Y, 1.0);
                }
                Axis::Y => {
                    self.record_contact(Axis::Y, 1.0);
                    other.set_on_ground();
                }
                _ => {
                    self.record_contact(axis, 0.0);
                    other.record_contact(axis, 0.0);
                }
            }
        }
    }
}

/// Computes how far `moving` has penetrated `fixed`, per axis.
///
/// The sign of `moving`'s velocity on an axis picks the faces that are
/// compared. Axes where `moving` has no velocity report zero.
pub fn calculate_breach(moving: &PhysicalObject, fixed: &PhysicalObject) -> Vec3 {
    let mut breach = Vec3::new(0.0, 0.0, 0.0);

    for axis in Axis::ALL {
        let i = axis.index();
        let velocity = moving.velocity[i];
        if velocity > 0.0 {
            breach[i] = moving.hitbox.max(axis) - fixed.hitbox.min(axis);
        } else if velocity < 0.0 {
            breach[i] = moving.hitbox.min(axis) - fixed.hitbox.max(axis);
        }
    }

    breach
}

/// Axis with the smallest non-zero breach magnitude, ties going to X, then Y, then Z.
fn smallest_breach_axis(breach: Vec3) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .filter(|axis| breach[axis.index()] != 0.0)
        .fold(None, |best: Option<Axis>, axis| match best {
            Some(current) if breach[current.index()].abs() <= breach[axis.index()].abs() => {
                Some(current)
            }
            _ => Some(axis),
        })
}

/// Among axes where the object is moving, the one with the smallest breach
/// magnitude.
fn contact_axis(velocity: Vec3, breach: Vec3) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .filter(|axis| velocity[axis.index()] != 0.0)
        .fold(None, |best: Option<Axis>, axis| match best {
            Some(current) if breach[current.index()].abs() <= breach[axis.index()].abs() => {
                Some(current)
            }
            _ => Some(axis),
        })
}

/// Moves `object` back out of a breach along the axis of least penetration.
/// Returns the axis that was corrected.
fn fix(object: &mut PhysicalObject, breach: Vec3) -> Option<Axis> {
    let axis = smallest_breach_axis(breach)?;
    object.hitbox.center[axis.index()] -= breach[axis.index()];
    Some(axis)
}

/// Exchanges momentum between two movable objects.
///
/// Each axis along which the objects are closing on each other is treated as
/// a one-dimensional perfectly elastic collision, so both momentum and kinetic
/// energy are conserved on that axis. Axes along which they are separating, or
/// not moving relative to each other, are left untouched.
fn apply_momentum(first: &mut PhysicalObject, second: &mut PhysicalObject) {
    let m1 = first.mass;
    let m2 = second.mass;
    let total = m1 + m2;

    for axis in Axis::ALL {
        let i = axis.index();
        let v1 = first.velocity[i];
        let v2 = second.velocity[i];
        let separation = second.hitbox.center[i] - first.hitbox.center[i];

        if (v1 - v2) * separation <= 0.0 {
            continue;
        }

        first.velocity[i] = ((m1 - m2) * v1 + 2.0 * m2 * v2) / total;
        second.velocity[i] = ((m2 - m1) * v2 + 2.0 * m1 * v1) / total;
        trace!(
            "momentum exchange on {:?}: ({}, {}) -> ({}, {})",
            axis,
            v1,
            v2,
            first.velocity[i],
            second.velocity[i]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maths::Aabc;
    use approx::assert_relative_eq;

    fn body(center: Vec3, half: f32, velocity: Vec3, mass: f32) -> PhysicalObject {
        let mut object =
            PhysicalObject::new(mass, Aabc::new(center, Vec3::new(half, half, half))).unwrap();
        object.velocity = velocity;
        object
    }

    fn block(center: Vec3, half: f32) -> PhysicalObject {
        PhysicalObject::immovable(Aabc::new(center, Vec3::new(half, half, half)))
    }

    #[test]
    fn breach_follows_velocity_direction() {
        let fixed = block(Vec3::new(0.0, 0.0, 0.0), 1.0);

        let rising = body(Vec3::new(0.0, -1.5, 0.0), 1.0, Vec3::new(0.0, 1.0, 0.0), 1.0);
        assert_relative_eq!(calculate_breach(&rising, &fixed).y, 0.5);

        let falling = body(Vec3::new(0.0, 1.5, 0.0), 1.0, Vec3::new(0.0, -1.0, 0.0), 1.0);
        assert_relative_eq!(calculate_breach(&falling, &fixed).y, -0.5);

        let idle = body(Vec3::new(0.5, 0.5, 0.5), 1.0, Vec3::new(0.0, 0.0, 0.0), 1.0);
        assert_eq!(calculate_breach(&idle, &fixed), Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn falling_object_lands_on_static_block() {
        let mut ground = block(Vec3::new(0.0, 0.0, 0.0), 1.0);
        let mut falling = body(Vec3::new(0.0, 1.5, 0.0), 1.0, Vec3::new(0.0, -1.0, 0.0), 1.0);

        falling.fix_collision(&mut ground);

        assert_eq!(falling.velocity().y, 0.0);
        assert!(!falling.collides_with(&ground));
        assert_relative_eq!(falling.position().y, 2.0);
        assert!(falling.on_ground());
        assert_eq!(ground.position(), Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn diagonal_landing_keeps_horizontal_velocity() {
        let mut ground = block(Vec3::new(0.0, 0.0, 0.0), 1.0);
        let mut falling = body(Vec3::new(-0.5, 1.375, 0.0), 0.5, Vec3::new(0.3, -0.2, 0.0), 1.0);

        falling.fix_collision(&mut ground);

        assert_eq!(falling.velocity().y, 0.0);
        assert_relative_eq!(falling.velocity().x, 0.3);
        assert!(!falling.collides_with(&ground));
    }

    #[test]
    fn sideways_contact_pushes_wall() {
        let mut wall = block(Vec3::new(0.0, 0.0, 0.0), 1.0);
        let mut walker = body(Vec3::new(-1.25, 0.0, 0.0), 0.5, Vec3::new(0.4, 0.0, 0.0), 1.0);

        walker.fix_collision(&mut wall);

        assert_eq!(walker.velocity().x, 0.0);
        assert_relative_eq!(walker.position().x, -1.5);
        assert!(walker.pushing_wall());
        assert!(!walker.on_ground());
    }

    #[test]
    fn frozen_object_is_never_corrected() {
        let mut frozen = block(Vec3::new(0.0, 0.0, 0.0), 1.0);
        let mut moving = body(Vec3::new(0.5, 0.0, 0.0), 1.0, Vec3::new(-1.0, 0.0, 0.0), 1.0);

        frozen.fix_collision(&mut moving);

        assert_eq!(frozen.position(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(moving.position(), Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(moving.velocity(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn separated_objects_are_left_alone() {
        let mut a = body(Vec3::new(0.0, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0), 1.0);
        let mut b = body(Vec3::new(3.0, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0), 1.0);

        a.fix_collision(&mut b);

        assert_eq!(a.velocity(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.velocity(), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn equal_masses_swap_velocities_head_on() {
        let mut a = body(Vec3::new(-0.4, 0.0, 0.0), 0.5, Vec3::new(1.0, 0.0, 0.0), 2.0);
        let mut b = body(Vec3::new(0.4, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0), 2.0);

        a.fix_collision(&mut b);

        assert_relative_eq!(a.velocity().x, -1.0);
        assert_relative_eq!(b.velocity().x, 1.0);
        // Each moved half of the overlap back.
        assert_relative_eq!(a.position().x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(b.position().x, 0.5, epsilon = 1e-6);
        assert!(a.pushing_wall() && b.pushing_wall());
    }

    #[test]
    fn momentum_is_conserved_between_unequal_masses() {
        let mut heavy = body(Vec3::new(-0.4, 0.0, 0.0), 0.5, Vec3::new(2.0, 0.0, 0.0), 3.0);
        let mut light = body(Vec3::new(0.4, 0.0, 0.0), 0.5, Vec3::new(-1.0, 0.0, 0.0), 1.0);
        let before = heavy.velocity().x * 3.0 + light.velocity().x * 1.0;
        let energy_before = 0.5 * 3.0 * 2.0f32.powi(2) + 0.5 * 1.0 * 1.0f32.powi(2);

        heavy.fix_collision(&mut light);

        let after = heavy.velocity().x * 3.0 + light.velocity().x * 1.0;
        let energy_after =
            0.5 * 3.0 * heavy.velocity().x.powi(2) + 0.5 * 1.0 * light.velocity().x.powi(2);
        assert_relative_eq!(before, after, epsilon = 1e-5);
        assert_relative_eq!(energy_before, energy_after, epsilon = 1e-4);
        assert!(light.velocity().x > heavy.velocity().x);
    }

    #[test]
    fn stationary_body_is_not_split_half_and_half() {
        let mut resting = body(Vec3::new(0.0, 0.0, 0.0), 0.5, Vec3::new(0.0, 0.0, 0.0), 1.0);
        let mut falling = body(Vec3::new(0.0, 0.75, 0.0), 0.5, Vec3::new(0.0, -0.5, 0.0), 1.0);

        falling.fix_collision(&mut resting);

        assert!(!falling.collides_with(&resting));
        assert_eq!(resting.position(), Vec3::new(0.0, 0.0, 0.0));
        assert!(falling.on_ground());
        assert!(resting.at_ceiling());
        // Elastic exchange hands the falling body's velocity to the resting one.
        assert_relative_eq!(falling.velocity().y, 0.0);
        assert_relative_eq!(resting.velocity().y, -0.5);
    }
}
