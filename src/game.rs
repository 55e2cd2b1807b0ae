//! # Game State
//!
//! The single context that owns everything a running game needs: the world,
//! the camera, the characters, loose physics props and the simulation that
//! moves them. Nothing in the engine lives in a global.
//!
//! ## Tick
//!
//! 1. Character logic turns held controls into forces
//! 2. Chunks are streamed in around the player when it enters a new chunk
//! 3. The simulation integrates every body and resolves collisions
//! 4. The camera follows the player

use cgmath::{Deg, Point3};
use log::{debug, info};

use crate::camera::Camera;
use crate::characters::Chicken;
use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::maths::Vec3;
use crate::physics::{PhysicalObject, Simulation, StaticGeometry};
use crate::render::Renderer;
use crate::traits::{Logicable, Renderable};
use crate::voxels::chunk::{BLOCK_WIDTH, CHUNK_DIMENSION};
use crate::voxels::world::World;

/// Owns the world and everything in it.
pub struct GameState {
    config: EngineConfig,
    world: World,
    camera: Camera,
    simulation: Simulation,
    /// The first chicken is the player.
    chickens: Vec<Chicken>,
    props: Vec<PhysicalObject>,
    player_chunk: Option<Point3<i32>>,
}

impl GameState {
    /// Validates `config` and creates a world from it. No chunk is generated
    /// until something is spawned.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let world = World::with_config(config.seed, config.world.clone())?;

        Ok(GameState {
            config,
            world,
            camera: Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(-20.0)),
            simulation: Simulation::new(),
            chickens: Vec::new(),
            props: Vec::new(),
            player_chunk: None,
        })
    }

    /// Spawns a chicken standing on the terrain of block column
    /// `(block_x, block_z)`. The first chicken spawned becomes the player.
    ///
    /// # Returns
    /// The index of the new chicken.
    ///
    /// # Errors
    /// `EngineError::ChunkOutOfBounds` if the column lies outside the world.
    pub fn spawn_chicken(&mut self, block_x: i32, block_z: i32) -> Result<usize, EngineError> {
        let mut top = i32::MIN;
        for dx in -1..=1 {
            for dz in -1..=1 {
                top = top.max(self.world.surface_height(block_x + dx, block_z + dz));
            }
        }

        let chunk = Point3::new(
            block_x.div_euclid(CHUNK_DIMENSION),
            (top + 1).div_euclid(CHUNK_DIMENSION),
            block_z.div_euclid(CHUNK_DIMENSION),
        );
        if !self.world.contains_chunk(chunk.x, chunk.y, chunk.z) {
            return Err(EngineError::ChunkOutOfBounds(chunk));
        }
        self.world.ensure_chunks_around(chunk, 1)?;

        let feet = Vec3::new(
            (block_x as f32 + 0.5) * BLOCK_WIDTH,
            (top + 1) as f32 * BLOCK_WIDTH,
            (block_z as f32 + 0.5) * BLOCK_WIDTH,
        );
        let chicken = Chicken::new(feet)?;
        info!("spawned a chicken at {:?}", feet);
        self.chickens.push(chicken);

        if self.chickens.len() == 1 {
            self.camera.follow(Point3::new(feet.x, feet.y, feet.z));
        }
        Ok(self.chickens.len() - 1)
    }

    /// Adds a loose physics body to the game.
    ///
    /// # Returns
    /// The index of the new prop.
    pub fn add_prop(&mut self, prop: PhysicalObject) -> usize {
        self.props.push(prop);
        self.props.len() - 1
    }

    /// Advances the game by `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> Result<(), EngineError> {
        for chicken in self.chickens.iter_mut() {
            chicken.logic(delta);
        }

        self.stream_chunks()?;

        let terrain: Option<&dyn StaticGeometry> = if self.config.simulation.resolve_terrain {
            Some(&self.world)
        } else {
            None
        };
        let mut bodies: Vec<&mut PhysicalObject> = self
            .chickens
            .iter_mut()
            .map(Chicken::body_mut)
            .chain(self.props.iter_mut())
            .collect();
        self.simulation.step(&mut bodies, delta, terrain);

        if let Some(player) = self.chickens.first() {
            let center = player.body().position();
            self.camera.follow(Point3::new(center.x, center.y, center.z));
        }
        Ok(())
    }

    /// Generates the chunks around the player once it enters a new chunk.
    fn stream_chunks(&mut self) -> Result<(), EngineError> {
        let Some(player) = self.chickens.first() else {
            return Ok(());
        };
        let center = player.body().position();
        let chunk = World::eye_chunk(Point3::new(center.x, center.y, center.z));
        if self.player_chunk == Some(chunk) {
            return Ok(());
        }

        let generated = self
            .world
            .ensure_chunks_around(chunk, self.world.render_distance())?;
        debug!(
            "player entered chunk ({}, {}, {}), generated {} chunks",
            chunk.x, chunk.y, chunk.z, generated
        );
        self.player_chunk = Some(chunk);
        Ok(())
    }

    /// Draws the world around the camera, then every character and prop.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.world.render(&self.camera, renderer);
        for chicken in &self.chickens {
            chicken.render(&self.camera, renderer);
        }
        for prop in &self.props {
            renderer.draw_body(prop.hitbox());
        }
    }

    /// The configuration the game was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for digging.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera, for looking around.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The player, if one has been spawned.
    pub fn player(&self) -> Option<&Chicken> {
        self.chickens.first()
    }

    /// Mutable access to the player, for input handling.
    pub fn player_mut(&mut self) -> Option<&mut Chicken> {
        self.chickens.first_mut()
    }

    /// Every chicken, player first.
    pub fn chickens(&self) -> &[Chicken] {
        &self.chickens
    }

    /// Every prop.
    pub fn props(&self) -> &[PhysicalObject] {
        &self.props
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.simulation.ticks()
    }
}
