//! # World Module
//!
//! This module provides the `World` struct which manages the chunks of the
//! voxel world and the gradient fields their terrain is generated from.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks that have been
//! generated are kept in memory, keyed by chunk coordinate. Chunk coordinates
//! are bounded to `[0, world_size)` on every axis.
//!
//! ## Chunk Generation
//!
//! Five gradient fields shape the terrain, derived from the world seed:
//!
//! | field | seed | use |
//! |---|---|---|
//! | height | `seed` | surface height |
//! | humidity | `seed + 1` | dry columns turn to sand |
//! | temperature | `seed + 2` | hot columns turn to sand |
//! | caves | `seed + 3` | carves air under the surface |
//! | ore | `seed + 4` | turns stone into ore |
//!
//! The gradient lattice has one cell per chunk. A column is grass on top (or
//! sand, in hot and dry columns and at or below sea level), then three blocks
//! of dirt (or sand), then stone.

use std::collections::HashMap;
use std::ops::Range;

use cgmath::Point3;
use log::{debug, info};
use noise::NoiseFn;

use crate::camera::CameraView;
use crate::config::WorldConfig;
use crate::errors::EngineError;
use crate::items::{Item, ItemStack};
use crate::maths::{Aabc, Axis, Vec3};
use crate::physics::StaticGeometry;
use crate::render::Renderer;
use crate::traits::{Hittable, Killable, Renderable};

use super::block::block_type::BlockType;
use super::block::Block;
use super::chunk::{Chunk, ChunkBuilder, BLOCK_WIDTH, CHUNK_DIMENSION, CHUNK_WIDTH};
use super::gradient::{GradientField2, GradientField3, MAX_WORLD_SIZE};

/// Blocks of dirt (or sand) between the surface block and the stone below.
pub const SOIL_DEPTH: i32 = 3;

/// Temperature above which a dry column turns to sand.
const HOT: f64 = 0.2;
/// Humidity below which a hot column turns to sand.
const DRY: f64 = -0.1;

/// Converts a world-space coordinate in meters to the chunk index containing
/// it, truncating toward zero.
fn chunk_index(meters: f32) -> i32 {
    (meters / CHUNK_WIDTH) as i32
}

/// Chunk indices from `center - below` up to, but not including,
/// `center + above`, clipped to `[0, size)`.
fn clipped_span(center: i32, below: i32, above: i32, size: i32) -> Range<i32> {
    center.saturating_sub(below).max(0)..center.saturating_add(above).min(size)
}

/// Gradient lattice coordinate of a block coordinate.
fn lattice(block: i32) -> f64 {
    block as f64 / CHUNK_DIMENSION as f64
}

/// Surface facts of one block column.
#[derive(Copy, Clone, Debug)]
struct Column {
    surface: i32,
    sandy: bool,
}

/// Represents a voxel world composed of chunks.
///
/// # Examples
///
/// ```
/// use chicky_engine::voxels::world::World;
///
/// let mut world = World::new(1234);
/// world.generate_chunk(0, 0, 0).unwrap();
/// assert!(world.chunk_at(0, 0, 0).is_some());
/// assert!(world.generate_chunk(-1, 0, 0).is_err());
/// ```
pub struct World {
    seed: i64,
    config: WorldConfig,
    chunks: HashMap<Point3<i32>, Chunk>,
    height: GradientField2,
    humidity: GradientField2,
    temperature: GradientField2,
    caves: GradientField3,
    ore: GradientField3,
}

impl World {
    /// Creates a full-size world from `seed` with default terrain settings.
    ///
    /// The 2D fields are generated right away; the 3D fields fill in as
    /// chunks are generated.
    pub fn new(seed: i64) -> Self {
        Self::build(seed, WorldConfig::default())
    }

    /// Creates a world from `seed` with the given settings.
    ///
    /// # Errors
    /// `EngineError::InvalidConfig` if a setting is out of range.
    pub fn with_config(seed: i64, config: WorldConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(seed, config))
    }

    fn build(seed: i64, config: WorldConfig) -> Self {
        let size = config.world_size as usize;
        let regions = config.field_cache_regions;
        info!(
            "creating world with seed {}: {} chunks per axis, render distance {}",
            seed, config.world_size, config.render_distance
        );

        World {
            seed,
            height: GradientField2::generate(seed, size),
            humidity: GradientField2::generate(seed.wrapping_add(1), size),
            temperature: GradientField2::generate(seed.wrapping_add(2), size),
            caves: GradientField3::generate(seed.wrapping_add(3), size, regions),
            ore: GradientField3::generate(seed.wrapping_add(4), size, regions),
            chunks: HashMap::new(),
            config,
        }
    }

    /// The world seed.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// The world's settings.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Chunks rendered on each side of the eye chunk.
    pub fn render_distance(&self) -> i32 {
        self.config.render_distance
    }

    /// Changes how many chunks are rendered around the eye, clamped to
    /// `0..=MAX_WORLD_SIZE`.
    pub fn set_render_distance(&mut self, render_distance: i32) {
        self.config.render_distance = render_distance.clamp(0, MAX_WORLD_SIZE as i32);
    }

    /// Number of generated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if `(x, y, z)` is a valid chunk coordinate.
    pub fn contains_chunk(&self, x: i32, y: i32, z: i32) -> bool {
        let extent = 0..self.config.world_size;
        extent.contains(&x) && extent.contains(&y) && extent.contains(&z)
    }

    /// The generated chunk at the given chunk coordinate, if any.
    pub fn chunk_at(&self, x: i32, y: i32, z: i32) -> Option<&Chunk> {
        self.chunks.get(&Point3::new(x, y, z))
    }

    /// Generates the chunk at the given chunk coordinate.
    ///
    /// Calling this for a chunk that already exists does nothing, so blocks
    /// dug out of it stay dug out.
    ///
    /// # Errors
    /// `EngineError::ChunkOutOfBounds` if the coordinate lies outside
    /// `[0, world_size)` on any axis.
    pub fn generate_chunk(&mut self, x: i32, y: i32, z: i32) -> Result<(), EngineError> {
        let position = Point3::new(x, y, z);
        if !self.contains_chunk(x, y, z) {
            return Err(EngineError::ChunkOutOfBounds(position));
        }
        if self.chunks.contains_key(&position) {
            return Ok(());
        }

        let chunk = self.compose_chunk(position);
        debug!(
            "generated chunk ({}, {}, {}) with {} solid blocks",
            x,
            y,
            z,
            chunk.solid_count()
        );
        self.chunks.insert(position, chunk);
        Ok(())
    }

    /// Generates every missing chunk within `radius` chunks of `center`,
    /// skipping coordinates outside the world.
    ///
    /// # Returns
    /// The number of chunks generated.
    pub fn ensure_chunks_around(
        &mut self,
        center: Point3<i32>,
        radius: i32,
    ) -> Result<usize, EngineError> {
        let size = self.config.world_size;
        let above = radius.saturating_add(1);
        let mut generated = 0;
        for x in clipped_span(center.x, radius, above, size) {
            for y in clipped_span(center.y, radius, above, size) {
                for z in clipped_span(center.z, radius, above, size) {
                    if self.chunk_at(x, y, z).is_some() {
                        continue;
                    }
                    self.generate_chunk(x, y, z)?;
                    generated += 1;
                }
            }
        }
        Ok(generated)
    }

    /// Height, in blocks, of the topmost solid block of the column at
    /// `(block_x, block_z)` before any digging.
    pub fn surface_height(&self, block_x: i32, block_z: i32) -> i32 {
        let (x, z) = (lattice(block_x), lattice(block_z));
        let broad = self.height.get([x, z]);
        let detail = self.height.get([x * 2.0 + 0.5, z * 2.0 + 0.5]);
        let noise = (broad + 0.5 * detail) / 1.5;
        self.config.sea_level + (noise * self.config.height_amplitude).round() as i32
    }

    fn column(&self, block_x: i32, block_z: i32) -> Column {
        let surface = self.surface_height(block_x, block_z);
        let point = [lattice(block_x), lattice(block_z)];
        let hot_and_dry = self.temperature.get(point) > HOT && self.humidity.get(point) < DRY;
        Column {
            surface,
            sandy: hot_and_dry || surface <= self.config.sea_level,
        }
    }

    /// The block generated at a block coordinate, given its column.
    fn generate_block(&self, block: Point3<i32>, column: Column) -> BlockType {
        if block.y > column.surface {
            return BlockType::AIR;
        }

        let depth = column.surface - block.y;
        let point = [lattice(block.x), lattice(block.y), lattice(block.z)];
        if depth > 0 && self.caves.get(point) > self.config.cave_threshold {
            return BlockType::AIR;
        }

        match (depth, column.sandy) {
            (0, true) => BlockType::SAND,
            (0, false) => BlockType::GRASS,
            (depth, true) if depth <= SOIL_DEPTH => BlockType::SAND,
            (depth, false) if depth <= SOIL_DEPTH => BlockType::DIRT,
            _ if self.ore.get(point) > self.config.ore_threshold => BlockType::ORE,
            _ => BlockType::STONE,
        }
    }

    fn compose_chunk(&self, position: Point3<i32>) -> Chunk {
        let origin = Point3::new(
            position.x * CHUNK_DIMENSION,
            position.y * CHUNK_DIMENSION,
            position.z * CHUNK_DIMENSION,
        );

        let mut columns = Vec::with_capacity((CHUNK_DIMENSION * CHUNK_DIMENSION) as usize);
        for k in 0..CHUNK_DIMENSION {
            for i in 0..CHUNK_DIMENSION {
                columns.push(self.column(origin.x + i, origin.z + k));
            }
        }

        let mut builder = ChunkBuilder::new(position);
        for k in 0..CHUNK_DIMENSION {
            for j in 0..CHUNK_DIMENSION {
                for i in 0..CHUNK_DIMENSION {
                    let column = columns[(k * CHUNK_DIMENSION + i) as usize];
                    let block = Point3::new(origin.x + i, origin.y + j, origin.z + k);
                    builder.push_block_type(self.generate_block(block, column));
                }
            }
        }
        builder.build()
    }

    /// Splits a block coordinate into its chunk coordinate and the
    /// chunk-local coordinate.
    fn locate(block: Point3<i32>) -> (Point3<i32>, Point3<usize>) {
        let chunk = Point3::new(
            block.x.div_euclid(CHUNK_DIMENSION),
            block.y.div_euclid(CHUNK_DIMENSION),
            block.z.div_euclid(CHUNK_DIMENSION),
        );
        let local = Point3::new(
            block.x.rem_euclid(CHUNK_DIMENSION) as usize,
            block.y.rem_euclid(CHUNK_DIMENSION) as usize,
            block.z.rem_euclid(CHUNK_DIMENSION) as usize,
        );
        (chunk, local)
    }

    /// The block at a block coordinate, if it is solid and its chunk is generated.
    pub fn block_at(&self, block: Point3<i32>) -> Option<&Block> {
        let (chunk, local) = Self::locate(block);
        self.chunks
            .get(&chunk)
            .and_then(|chunk| chunk.block_at(local.x, local.y, local.z))
    }

    /// Returns true if a generated, solid block occupies the block coordinate.
    pub fn is_solid(&self, block: Point3<i32>) -> bool {
        let (chunk, local) = Self::locate(block);
        self.chunks
            .get(&chunk)
            .is_some_and(|chunk| chunk.is_block_solid(local.x, local.y, local.z))
    }

    /// Hits the block at a block coordinate. A block that dies is removed.
    ///
    /// # Returns
    /// The items the block dropped, empty unless the hit destroyed it.
    ///
    /// # Errors
    /// `EngineError::NoBlockAt` if there is no generated solid block there.
    pub fn hit_block(
        &mut self,
        block: Point3<i32>,
        with: Option<&Item>,
        power: f32,
    ) -> Result<Vec<ItemStack>, EngineError> {
        let (chunk_position, local) = Self::locate(block);
        let chunk = self
            .chunks
            .get_mut(&chunk_position)
            .ok_or(EngineError::NoBlockAt(block))?;
        let target = chunk
            .block_at_mut(local.x, local.y, local.z)
            .ok_or(EngineError::NoBlockAt(block))?;

        let drops = target.hit(with, power);
        if !target.is_alive() {
            chunk.remove_block(local.x, local.y, local.z);
            debug!("block ({}, {}, {}) destroyed", block.x, block.y, block.z);
        }
        Ok(drops)
    }

    /// The chunk containing a world-space point, truncating toward zero.
    pub fn eye_chunk(position: Point3<f32>) -> Point3<i32> {
        Point3::new(
            chunk_index(position.x),
            chunk_index(position.y),
            chunk_index(position.z),
        )
    }

    /// The chunk coordinates rendered from `camera`: the window
    /// `[eye - render_distance, eye + render_distance)` on every axis, minus
    /// coordinates outside the world.
    pub fn visible_chunk_positions(&self, camera: &dyn CameraView) -> Vec<Point3<i32>> {
        let eye = Self::eye_chunk(camera.position());
        let distance = self.config.render_distance;
        let size = self.config.world_size;
        let mut positions = Vec::new();
        for x in clipped_span(eye.x, distance, distance, size) {
            for y in clipped_span(eye.y, distance, distance, size) {
                for z in clipped_span(eye.z, distance, distance, size) {
                    positions.push(Point3::new(x, y, z));
                }
            }
        }
        positions
    }
}

impl Renderable for World {
    /// Renders every generated chunk in the window around the camera.
    /// Chunks in the window that were never generated are skipped.
    fn render(&self, camera: &dyn CameraView, renderer: &mut dyn Renderer) {
        for position in self.visible_chunk_positions(camera) {
            if let Some(chunk) = self.chunks.get(&position) {
                chunk.render(camera, renderer);
            }
        }
    }
}

impl StaticGeometry for World {
    fn hitboxes_near(&self, area: &Aabc) -> Vec<Aabc> {
        let block = Vec3::new(BLOCK_WIDTH, BLOCK_WIDTH, BLOCK_WIDTH);
        let grown = Aabc::new(area.center, area.half_size + block);
        let low = |axis: Axis| (grown.min(axis) / BLOCK_WIDTH).floor() as i32;
        let high = |axis: Axis| (grown.max(axis) / BLOCK_WIDTH).floor() as i32;
        let half = block * 0.5;

        let mut hitboxes = Vec::new();
        for x in low(Axis::X)..=high(Axis::X) {
            for y in low(Axis::Y)..=high(Axis::Y) {
                for z in low(Axis::Z)..=high(Axis::Z) {
                    if !self.is_solid(Point3::new(x, y, z)) {
                        continue;
                    }
                    let center = Vec3::new(x as f32, y as f32, z as f32) * BLOCK_WIDTH + half;
                    let hitbox = Aabc::new(center, half);
                    if hitbox.collides_with(&grown) {
                        hitboxes.push(hitbox);
                    }
                }
            }
        }
        hitboxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::items::ToolType;
    use crate::render::FrameStats;
    use cgmath::Deg;

    fn small_config() -> WorldConfig {
        WorldConfig {
            world_size: 8,
            render_distance: 1,
            ..WorldConfig::default()
        }
    }

    fn small_world(seed: i64) -> World {
        World::with_config(seed, small_config()).unwrap()
    }

    fn camera_at(x: f32, y: f32, z: f32) -> Camera {
        Camera::new(Point3::new(x, y, z), Deg(0.0), Deg(-30.0))
    }

    #[test]
    fn out_of_range_chunks_are_rejected() {
        let mut world = small_world(1);
        for (x, y, z) in [(-1, 0, 0), (0, 8, 0), (0, 0, 100)] {
            assert!(matches!(
                world.generate_chunk(x, y, z),
                Err(EngineError::ChunkOutOfBounds(position)) if position == Point3::new(x, y, z)
            ));
        }
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let config = WorldConfig {
            world_size: 0,
            ..WorldConfig::default()
        };
        assert!(World::with_config(1, config).is_err());
    }

    #[test]
    fn generation_is_deterministic() {
        let mut first = small_world(99);
        let mut second = small_world(99);
        first.generate_chunk(2, 2, 3).unwrap();
        second.generate_chunk(2, 2, 3).unwrap();

        let a: Vec<_> = first.chunk_at(2, 2, 3).unwrap().iter_blocks().collect();
        let b: Vec<_> = second.chunk_at(2, 2, 3).unwrap().iter_blocks().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn regenerating_an_existing_chunk_keeps_its_blocks() {
        let mut world = small_world(5);
        world.generate_chunk(0, 0, 0).unwrap();
        let before = world.chunk_at(0, 0, 0).unwrap().solid_count();

        let dug = world
            .chunk_at(0, 0, 0)
            .unwrap()
            .iter_blocks()
            .next()
            .map(|(local, _)| Point3::new(local.x as i32, local.y as i32, local.z as i32))
            .unwrap();
        world
            .hit_block(dug, Some(&Item::Tool(ToolType::Pick)), 1000.0)
            .unwrap();
        world.generate_chunk(0, 0, 0).unwrap();

        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.chunk_at(0, 0, 0).unwrap().solid_count(), before - 1);
        assert!(!world.is_solid(dug));
    }

    #[test]
    fn deep_chunks_are_rock_and_high_chunks_are_air() {
        // Surface heights stay within sea level ± amplitude: 24..=72 blocks.
        let mut world = small_world(3);
        world.generate_chunk(1, 0, 1).unwrap();
        world.generate_chunk(1, 5, 1).unwrap();

        let deep = world.chunk_at(1, 0, 1).unwrap();
        assert!(deep.solid_count() > 0);
        assert!(deep.iter_blocks().all(|(_, block)| matches!(
            block.block_type(),
            BlockType::STONE | BlockType::ORE
        )));
        assert!(world.chunk_at(1, 5, 1).unwrap().is_empty());
    }

    #[test]
    fn columns_are_topped_with_grass_or_sand() {
        let mut world = small_world(11);
        for y in 1..5 {
            world.generate_chunk(0, y, 0).unwrap();
        }

        for (x, z) in [(0, 0), (5, 9), (15, 15)] {
            let surface = world.surface_height(x, z);
            let top = world.block_at(Point3::new(x, surface, z)).map(Block::block_type);
            assert!(matches!(top, Some(BlockType::GRASS) | Some(BlockType::SAND)));
            assert!(!world.is_solid(Point3::new(x, surface + 1, z)));
        }
    }

    #[test]
    fn hitting_air_is_an_error() {
        let mut world = small_world(2);
        world.generate_chunk(0, 7, 0).unwrap();
        let sky = Point3::new(3, 7 * CHUNK_DIMENSION + 4, 3);
        assert!(matches!(
            world.hit_block(sky, None, 1.0),
            Err(EngineError::NoBlockAt(position)) if position == sky
        ));
        let ungenerated = Point3::new(40, 3, 40);
        assert!(world.hit_block(ungenerated, None, 1.0).is_err());
    }

    #[test]
    fn eye_chunk_truncates_toward_zero() {
        assert_eq!(World::eye_chunk(Point3::new(44.0, 7.9, 8.0)), Point3::new(5, 0, 1));
        assert_eq!(World::eye_chunk(Point3::new(-3.0, 0.0, 0.0)), Point3::new(0, 0, 0));
    }

    #[test]
    fn render_window_is_clipped_to_the_world() {
        let config = WorldConfig {
            world_size: 10,
            render_distance: 2,
            ..WorldConfig::default()
        };
        let world = World::with_config(0, config).unwrap();

        let centred = world.visible_chunk_positions(&camera_at(44.0, 44.0, 44.0));
        assert_eq!(centred.len(), 64);
        assert!(centred.iter().all(|position| {
            [position.x, position.y, position.z]
                .iter()
                .all(|c| (3..7).contains(c))
        }));

        let cornered = world.visible_chunk_positions(&camera_at(0.0, 0.0, 0.0));
        assert_eq!(cornered.len(), 8);
    }

    #[test]
    fn cameras_far_outside_the_world_see_nothing() {
        let mut world = small_world(6);
        world.generate_chunk(0, 0, 0).unwrap();

        for camera in [
            camera_at(-1e12, 0.0, 0.0),
            camera_at(1e12, 1e12, 1e12),
            camera_at(0.0, f32::MIN, 0.0),
        ] {
            assert!(world.visible_chunk_positions(&camera).is_empty());
            let mut stats = FrameStats::default();
            world.render(&camera, &mut stats);
            assert_eq!(stats.chunks, 0);
        }
    }

    #[test]
    fn chunks_around_far_centres_are_skipped() {
        let mut world = small_world(6);
        let far = [Point3::new(i32::MIN, 0, 0), Point3::new(0, i32::MAX, 0)];
        for center in far {
            assert_eq!(world.ensure_chunks_around(center, 2).unwrap(), 0);
        }
        assert_eq!(world.ensure_chunks_around(Point3::new(-1, 0, 0), 1).unwrap(), 4);
        assert_eq!(world.chunk_count(), 4);
    }

    #[test]
    fn render_distance_is_clamped() {
        let mut world = small_world(6);
        world.set_render_distance(i32::MAX);
        assert_eq!(world.render_distance(), MAX_WORLD_SIZE as i32);
        assert_eq!(world.visible_chunk_positions(&camera_at(0.0, 0.0, 0.0)).len(), 8 * 8 * 8);
        world.set_render_distance(-5);
        assert_eq!(world.render_distance(), 0);
    }

    #[test]
    fn render_visits_only_generated_chunks_in_the_window() {
        let mut world = small_world(4);
        world.generate_chunk(3, 3, 3).unwrap();
        world.generate_chunk(4, 4, 4).unwrap();
        world.generate_chunk(0, 0, 0).unwrap();

        // Eye chunk (4, 4, 4) with distance 1: window is [3, 5) per axis.
        let mut stats = FrameStats::default();
        world.render(&camera_at(36.0, 36.0, 36.0), &mut stats);
        assert_eq!(stats.chunks, 2);
    }

    #[test]
    fn terrain_hitboxes_cover_solid_blocks() {
        let mut world = small_world(8);
        world.generate_chunk(0, 0, 0).unwrap();
        let deep = world.chunk_at(0, 0, 0).unwrap();
        let (local, _) = deep
            .iter_blocks()
            .find(|(local, _)| local.x > 0 && local.y > 0 && local.z > 0)
            .unwrap();

        let center = Vec3::new(
            local.x as f32 + 0.5,
            local.y as f32 + 0.5,
            local.z as f32 + 0.5,
        ) * BLOCK_WIDTH;
        let probe = Aabc::new(center, Vec3::new(0.1, 0.1, 0.1));
        let hitboxes = world.hitboxes_near(&probe);

        assert!(hitboxes.iter().any(|hitbox| hitbox.center == center));
        assert!(hitboxes
            .iter()
            .all(|hitbox| hitbox.half_size == Vec3::new(0.25, 0.25, 0.25)));
    }
}
