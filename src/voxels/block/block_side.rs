//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block.
//! It provides functionality for face culling and visibility determination.

use cgmath::{InnerSpace, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Unit offset from a block to its neighbour across this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Determines which block faces are potentially visible from a given view direction.
    ///
    /// A face is kept unless it points along the view direction by more than
    /// 45 degrees, in which case the camera is looking at its back.
    ///
    /// # Arguments
    /// * `view_vec` - The view direction vector
    ///
    /// # Returns
    /// A vector containing all potentially visible block faces.
    pub fn get_visible_sides(view_vec: Vector3<f32>) -> Vec<BlockSide> {
        // The cutoff is 1/√2, the cosine of 45 degrees.
        const CUTOFF: f32 = std::f32::consts::FRAC_1_SQRT_2;

        if view_vec.magnitude2() == 0.0 {
            return BlockSide::all().to_vec();
        }
        let view_vec = view_vec.normalize();

        BlockSide::all()
            .into_iter()
            .filter(|side| side.normal().cast::<f32>().map_or(true, |n| n.dot(view_vec) < CUTOFF))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looking_down_hides_the_bottom_faces() {
        let visible = BlockSide::get_visible_sides(Vector3::new(0.0, -1.0, 0.0));
        assert!(visible.contains(&BlockSide::TOP));
        assert!(!visible.contains(&BlockSide::BOTTOM));
        assert_eq!(visible.len(), 5);
    }

    #[test]
    fn zero_view_vector_keeps_every_face() {
        assert_eq!(BlockSide::get_visible_sides(Vector3::new(0.0, 0.0, 0.0)).len(), 6);
    }

    #[test]
    fn normals_are_opposite_in_pairs() {
        let zero = Vector3::new(0, 0, 0);
        assert_eq!(BlockSide::FRONT.normal() + BlockSide::BACK.normal(), zero);
        assert_eq!(BlockSide::TOP.normal() + BlockSide::BOTTOM.normal(), zero);
        assert_eq!(BlockSide::RIGHT.normal() + BlockSide::LEFT.normal(), zero);
    }
}
