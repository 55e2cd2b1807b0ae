//! # Physics Module
//!
//! Motion integration and collision resolution for bodies carrying an
//! axis-aligned bounding cube.
//!
//! ## Components
//!
//! * `PhysicalObject` - hitbox, velocity, acceleration, mass and contact flags
//! * `collision` - breach calculation, overlap correction and momentum exchange
//! * `Simulation` - runs one tick over a set of bodies with a fixed ordering
//!
//! ## Tick Ordering
//!
//! Every body is integrated before any collision is resolved. Body pairs are
//! then resolved in lexicographic `(i, j)` order, followed by each body against the
//! static terrain.

pub mod collision;
pub mod physical_object;
pub mod simulation;

pub use physical_object::{PhysicalObject, GRAVITY};
pub use simulation::{Simulation, StaticGeometry};
