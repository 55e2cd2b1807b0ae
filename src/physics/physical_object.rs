//! # Physical Object
//!
//! A body with a hitbox, velocity, acceleration and mass, integrated once per
//! tick. Collision resolution between bodies lives in the sibling `collision`
//! module.

use std::fmt;

use log::trace;

use crate::errors::EngineError;
use crate::maths::{Aabc, Axis, Vec3};

/// Gravitational acceleration along the Y axis (m/s/s).
pub const GRAVITY: f32 = -9.81;

/// Callback fired when a contact flag switches on.
pub type ContactCallback = Box<dyn FnMut() + Send>;

/// An object with physics, position, velocity and mass.
///
/// Position lives in the hitbox center. Velocity and acceleration can only be
/// changed from outside through [`PhysicalObject::apply_force`] and
/// [`PhysicalObject::stop_motion`].
///
/// A frozen object is never moved by physics or by collision resolution, but
/// other objects still collide against it.
pub struct PhysicalObject {
    pub(super) frozen: bool,

    pub(super) velocity: Vec3,
    pub(super) acceleration: Vec3,
    /// In kilograms.
    pub(super) mass: f32,

    pub(super) on_ground: bool,
    pub(super) pushing_wall: bool,
    pub(super) at_ceiling: bool,

    pub(super) was_on_ground: bool,
    pub(super) was_pushing_wall: bool,
    pub(super) was_at_ceiling: bool,

    on_ground_hit: Option<ContactCallback>,
    on_push: Option<ContactCallback>,
    on_ceiling_hit: Option<ContactCallback>,

    /// Hitbox for collision calculation.
    pub(super) hitbox: Aabc,
}

impl PhysicalObject {
    /// Creates a movable object.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidMass`] unless `mass` is finite and
    /// greater than zero, since forces are divided by it.
    pub fn new(mass: f32, hitbox: Aabc) -> Result<Self, EngineError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EngineError::InvalidMass(mass));
        }

        Ok(Self {
            frozen: false,
            velocity: Vec3::new(0.0, 0.0, 0.0),
            acceleration: Vec3::new(0.0, 0.0, 0.0),
            mass,
            on_ground: false,
            pushing_wall: false,
            at_ceiling: false,
            was_on_ground: false,
            was_pushing_wall: false,
            was_at_ceiling: false,
            on_ground_hit: None,
            on_push: None,
            on_ceiling_hit: None,
            hitbox,
        })
    }

    /// Creates a frozen object of unit mass, used for static obstacles such as
    /// terrain blocks.
    pub fn immovable(hitbox: Aabc) -> Self {
        Self {
            frozen: true,
            velocity: Vec3::new(0.0, 0.0, 0.0),
            acceleration: Vec3::new(0.0, 0.0, 0.0),
            mass: 1.0,
            on_ground: false,
            pushing_wall: false,
            at_ceiling: false,
            was_on_ground: false,
            was_pushing_wall: false,
            was_at_ceiling: false,
            on_ground_hit: None,
            on_push: None,
            on_ceiling_hit: None,
            hitbox,
        }
    }

    /// Returns the object's position (its hitbox center).
    pub fn position(&self) -> Vec3 {
        self.hitbox.center
    }

    /// Moves the object to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.hitbox.center = position;
    }

    /// Moves the object by `offset`.
    pub fn add_position(&mut self, offset: Vec3) {
        self.hitbox.center += offset;
    }

    /// The object's hitbox.
    pub fn hitbox(&self) -> &Aabc {
        &self.hitbox
    }

    /// Current velocity.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Acceleration accumulated by forces since the last integration.
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Mass in kilograms.
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Whether the object ignores physics and collision resolution.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freezes or unfreezes the object.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Whether the object rested on something during the last resolution pass.
    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Whether the object was pushing against a wall during the last resolution pass.
    pub fn pushing_wall(&self) -> bool {
        self.pushing_wall
    }

    /// Whether the object hit a ceiling during the last resolution pass.
    pub fn at_ceiling(&self) -> bool {
        self.at_ceiling
    }

    /// `on_ground` as it was before the last resolution pass.
    pub fn was_on_ground(&self) -> bool {
        self.was_on_ground
    }

    /// `pushing_wall` as it was before the last resolution pass.
    pub fn was_pushing_wall(&self) -> bool {
        self.was_pushing_wall
    }

    /// `at_ceiling` as it was before the last resolution pass.
    pub fn was_at_ceiling(&self) -> bool {
        self.was_at_ceiling
    }

    /// Registers the callback fired when the object lands.
    pub fn set_on_ground_hit<F: FnMut() + Send + 'static>(&mut self, callback: F) {
        self.on_ground_hit = Some(Box::new(callback));
    }

    /// Registers the callback fired when the object starts pushing a wall.
    pub fn set_on_push<F: FnMut() + Send + 'static>(&mut self, callback: F) {
        self.on_push = Some(Box::new(callback));
    }

    /// Registers the callback fired when the object bumps a ceiling.
    pub fn set_on_ceiling_hit<F: FnMut() + Send + 'static>(&mut self, callback: F) {
        self.on_ceiling_hit = Some(Box::new(callback));
    }

    /// Integrates one tick of motion.
    ///
    /// Gravity is added unless the object is on the ground. Acceleration is
    /// scaled by `delta` into a velocity change, then velocity is scaled by
    /// `delta` into a displacement that moves the hitbox. Acceleration is reset
    /// afterwards, so only forces applied during the tick matter.
    ///
    /// Frozen objects are left untouched.
    pub fn physics(&mut self, delta: f32) {
        if self.frozen {
            return;
        }

        if !self.on_ground {
            self.acceleration.y += GRAVITY;
        }

        self.acceleration *= delta; // now a velocity change
        self.velocity += self.acceleration;

        self.velocity *= delta; // now a displacement
        self.hitbox.center += self.velocity;

        self.acceleration = Vec3::new(0.0, 0.0, 0.0);
    }

    /// Applies a force, in newtons, for the current tick.
    ///
    /// This is the only way to push a `PhysicalObject` around.
    pub fn apply_force(&mut self, newtons: Vec3) {
        self.acceleration += newtons / self.mass;
    }

    /// Immediately zeroes velocity and acceleration.
    pub fn stop_motion(&mut self) {
        self.velocity = Vec3::new(0.0, 0.0, 0.0);
        self.acceleration = Vec3::new(0.0, 0.0, 0.0);
    }

    /// Returns true if the two hitboxes overlap.
    pub fn collides_with(&self, other: &PhysicalObject) -> bool {
        self.hitbox.collides_with(&other.hitbox)
    }

    /// Snapshots the contact flags into their `was_*` counterparts and clears
    /// them ahead of a resolution pass.
    pub fn begin_contact_pass(&mut self) {
        self.was_on_ground = self.on_ground;
        self.was_pushing_wall = self.pushing_wall;
        self.was_at_ceiling = self.at_ceiling;

        self.on_ground = false;
        self.pushing_wall = false;
        self.at_ceiling = false;
    }

    /// Records a contact along `axis`. `approach` is the velocity component the
    /// object had along that axis before the contact stopped it.
    pub(super) fn record_contact(&mut self, axis: Axis, approach: f32) {
        match axis {
            Axis::Y if approach < 0.0 => self.set_on_ground(),
            Axis::Y => {
                if !self.at_ceiling && !self.was_at_ceiling {
                    trace!("ceiling hit at {:?}", self.hitbox.center);
                    if let Some(callback) = self.on_ceiling_hit.as_mut() {
                        callback();
                    }
                }
                self.at_ceiling = true;
            }
            Axis::X | Axis::Z => {
                if !self.pushing_wall && !self.was_pushing_wall {
                    trace!("started pushing a wall at {:?}", self.hitbox.center);
                    if let Some(callback) = self.on_push.as_mut() {
                        callback();
                    }
                }
                self.pushing_wall = true;
            }
        }
    }

    pub(super) fn set_on_ground(&mut self) {
        if !self.on_ground && !self.was_on_ground {
            trace!("landed at {:?}", self.hitbox.center);
            if let Some(callback) = self.on_ground_hit.as_mut() {
                callback();
            }
        }
        self.on_ground = true;
    }
}

impl fmt::Debug for PhysicalObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalObject")
            .field("frozen", &self.frozen)
            .field("velocity", &self.velocity)
            .field("acceleration", &self.acceleration)
            .field("mass", &self.mass)
            .field("on_ground", &self.on_ground)
            .field("pushing_wall", &self.pushing_wall)
            .field("at_ceiling", &self.at_ceiling)
            .field("hitbox", &self.hitbox)
            .finish_non_exhaustive()
    }
}
