//! # Capability Traits
//!
//! Behaviour shared by blocks and characters. Concrete types opt in to the
//! capabilities they support; nothing inherits from anything.

use crate::camera::CameraView;
use crate::characters::Direction;
use crate::items::{Item, ItemStack};
use crate::render::Renderer;

/// Something that takes damage when hit.
pub trait Hittable {
    /// Hits the object with an optional item at the given power. Returns
    /// whatever it drops as a result, which is only non-empty when the hit
    /// killed it.
    fn hit(&mut self, with: Option<&Item>, power: f32) -> Vec<ItemStack>;
}

/// Anything that can be killed.
pub trait Killable {
    /// Kills the object outright. Returns the items it drops.
    fn kill(&mut self) -> Vec<ItemStack>;

    /// Returns true while the object has health left.
    fn is_alive(&self) -> bool;

    /// Health points left.
    fn health_left(&self) -> f32;

    /// Max health points.
    fn lifespan(&self) -> f32;
}

/// Something that draws itself through a `Renderer`.
pub trait Renderable {
    /// Issues draw calls for the object as seen from `camera`.
    fn render(&self, camera: &dyn CameraView, renderer: &mut dyn Renderer);
}

/// Something with per-tick game logic.
pub trait Logicable {
    /// Runs one tick of logic. `delta` is in seconds.
    fn logic(&mut self, delta: f32);
}

/// A character that can be steered by input.
pub trait Controllable {
    /// Walks in `direction`, running if `sprint` is set.
    fn walk(&mut self, direction: Direction, sprint: bool);

    /// Jumps, if possible.
    fn jump(&mut self, sprint: bool);

    /// Crouches.
    fn down(&mut self, sprint: bool);

    /// Stops moving.
    fn stop(&mut self);
}
