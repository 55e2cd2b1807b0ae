//! # Voxels
//!
//! The block world: what a block is, how blocks are packed into chunks, the
//! gradient fields terrain is shaped from, and the world that owns them all.
//!
//! ## Data Flow
//!
//! 1. `World` is created from a seed and builds its gradient fields
//! 2. Chunks are generated on demand by sampling those fields per block column
//! 3. Physics asks the world for the hitboxes of solid blocks near a body
//! 4. Rendering walks the chunks around the camera and draws exposed faces

pub mod block;
pub mod chunk;
pub mod gradient;
pub mod world;
