//! # Simulation
//!
//! Runs one physics tick over a set of bodies:
//!
//! 1. Integrate every body (`PhysicalObject::physics`).
//! 2. Snapshot and clear every body's contact flags.
//! 3. Resolve body pairs `(i, j)` with `i < j` in lexicographic order:
//!    `(0, 1)`, `(0, 2)`, ..., `(1, 2)`, ...
//! 4. Resolve each movable body against nearby static geometry.
//! 5. Keep resting bodies grounded when they sit exactly on a support.
//!
//! Resolving every pair only after all bodies have moved keeps the outcome
//! independent of integration order. The fixed pair order makes three-body
//! overlaps reproducible.

use log::trace;

use crate::maths::{Aabc, Vec3};

use super::PhysicalObject;

/// How far below a body the ground probe looks for a support, in meters.
pub const GROUND_PROBE_DISTANCE: f32 = 1e-3;

/// Static geometry that bodies collide against, such as terrain.
pub trait StaticGeometry {
    /// Returns the hitboxes of all static solids overlapping `area` grown by
    /// one block in every direction.
    fn hitboxes_near(&self, area: &Aabc) -> Vec<Aabc>;
}

/// Drives physics ticks and counts them.
#[derive(Debug, Default)]
pub struct Simulation {
    ticks: u64,
}

impl Simulation {
    /// Creates a simulation that has not run yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances every body by `delta` seconds and resolves their collisions.
    ///
    /// `terrain`, when given, supplies the static hitboxes each movable body
    /// is resolved against after the body pairs.
    pub fn step(
        &mut self,
        bodies: &mut [&mut PhysicalObject],
        delta: f32,
        terrain: Option<&dyn StaticGeometry>,
    ) {
        for body in bodies.iter_mut() {
            body.physics(delta);
        }

        for body in bodies.iter_mut() {
            body.begin_contact_pass();
        }

        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let first = &mut *head[i];
            for second in tail.iter_mut() {
                if first.is_frozen() {
                    second.fix_collision(first);
                } else {
                    first.fix_collision(second);
                }
            }
        }

        let mut supports: Vec<Vec<Aabc>> = Vec::with_capacity(bodies.len());
        for body in bodies.iter_mut() {
            let statics = match terrain {
                Some(terrain) if !body.is_frozen() => terrain.hitboxes_near(body.hitbox()),
                _ => Vec::new(),
            };
            for hitbox in &statics {
                let mut obstacle = PhysicalObject::immovable(*hitbox);
                body.fix_collision(&mut obstacle);
            }
            supports.push(statics);
        }

        let frozen_hitboxes: Vec<Aabc> = bodies
            .iter()
            .filter(|body| body.is_frozen())
            .map(|body| *body.hitbox())
            .collect();
        for (body, statics) in bodies.iter_mut().zip(supports.iter()) {
            if body.is_frozen() || body.on_ground() || !body.was_on_ground() {
                continue;
            }
            if body.velocity().y > 0.0 {
                continue;
            }
            let resting = statics
                .iter()
                .chain(frozen_hitboxes.iter())
                .any(|support| rests_on(body.hitbox(), support));
            if resting {
                trace!("body at {:?} still resting", body.position());
                body.set_on_ground();
            }
        }

        self.ticks += 1;
    }
}

/// Returns true if `hitbox` sits on top of `support`: nudging it down by the
/// probe distance makes them overlap while its bottom is not below the
/// support's top.
fn rests_on(hitbox: &Aabc, support: &Aabc) -> bool {
    let probe = hitbox.translated(Vec3::new(0.0, -GROUND_PROBE_DISTANCE, 0.0));
    let bottom = hitbox.center.y - hitbox.half_size.y;
    let top = support.center.y + support.half_size.y;
    probe.collides_with(support) && bottom >= top - GROUND_PROBE_DISTANCE
}
