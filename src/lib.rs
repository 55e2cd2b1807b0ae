#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Chicky Engine
//!
//! A voxel game engine core: a chunked, procedurally generated block world
//! and the physics that lets chickens walk, fall and bump around in it.
//!
//! ## Key Modules
//!
//! * `maths` - Vector aliases and axis-aligned bounding cubes
//! * `physics` - The `PhysicalObject` integrator, collision resolution and the tick ordering
//! * `voxels` - Blocks, chunks, gradient fields and the `World` that owns them
//! * `characters` - Chickens, which put a `PhysicalObject` behind a set of controls
//! * `game` - `GameState`, the one context that owns a running game
//!
//! ## Architecture
//!
//! The engine does not draw anything itself. Rendering goes through the
//! `render::Renderer` trait and viewpoints through `camera::CameraView`, so a
//! GPU backend can be plugged in without the engine knowing about it.
//!
//! ## Usage
//!
//! ```rust
//! use chicky_engine::config::{EngineConfig, WorldConfig};
//! use chicky_engine::game::GameState;
//! use chicky_engine::render::FrameStats;
//!
//! let config = EngineConfig {
//!     world: WorldConfig { world_size: 8, render_distance: 1, ..WorldConfig::default() },
//!     ..EngineConfig::default()
//! };
//! let mut game = GameState::new(config).unwrap();
//! game.spawn_chicken(40, 40).unwrap();
//! game.tick(1.0 / 60.0).unwrap();
//!
//! let mut stats = FrameStats::default();
//! game.render(&mut stats);
//! assert_eq!(stats.bodies, 1);
//! ```

use log::{info, warn};
use web_time::Instant;

pub mod camera;
pub mod characters;
pub mod config;
pub mod errors;
pub mod game;
pub mod items;
pub mod maths;
pub mod physics;
pub mod render;
pub mod traits;
pub mod voxels;

use config::{EngineConfig, CONFIG_ENV_VAR};
use errors::EngineError;
use game::GameState;
use render::FrameStats;

/// Column the player is spawned on when running headless.
const SPAWN_COLUMN: (i32, i32) = (64, 64);

fn load_config() -> EngineConfig {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        info!("{} not set, using the default configuration", CONFIG_ENV_VAR);
        return EngineConfig::default();
    };
    match EngineConfig::load(&path) {
        Ok(config) => config,
        Err(error) => {
            warn!("{}, using the default configuration", error);
            EngineConfig::default()
        }
    }
}

/// Runs the game headless for the configured number of ticks.
pub fn run_game(config: EngineConfig) -> Result<FrameStats, EngineError> {
    let started = Instant::now();
    let mut game = GameState::new(config)?;

    let size = game.config().world.world_size * voxels::chunk::CHUNK_DIMENSION;
    let (x, z) = SPAWN_COLUMN;
    game.spawn_chicken(x.min(size / 2), z.min(size / 2))?;
    info!("world ready in {:?}", started.elapsed());

    let delta = game.config().simulation.delta();
    let simulated = Instant::now();
    for _ in 0..game.config().simulation.ticks {
        game.tick(delta)?;
    }
    info!(
        "simulated {} ticks in {:?}",
        game.ticks(),
        simulated.elapsed()
    );

    let mut stats = FrameStats::default();
    game.render(&mut stats);
    info!(
        "last frame: {} chunks, {} blocks, {} faces, {} bodies",
        stats.chunks, stats.blocks, stats.faces, stats.bodies
    );
    Ok(stats)
}

/// Initialises logging, loads the configuration named by `CHICKY_CONFIG` (or
/// the defaults) and runs the game headless.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let config = load_config();
    if let Err(error) = run_game(config) {
        log::error!("{}", error);
    }
}
