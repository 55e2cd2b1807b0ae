//! # Errors
//!
//! Error type shared by every fallible operation in the engine. Integration and
//! collision resolution are pure numeric transforms and never fail; errors only
//! come from invalid construction parameters, caller bugs such as generating a
//! chunk outside the world, and configuration loading.

use std::error::Error;
use std::fmt;
use std::io;

use cgmath::Point3;

/// Errors produced by the engine.
#[derive(Debug)]
pub enum EngineError {
    /// A physical object was constructed with a mass that is not finite and positive.
    InvalidMass(f32),
    /// A chunk coordinate outside `[0, world_size)` on some axis.
    ChunkOutOfBounds(Point3<i32>),
    /// A block was addressed where there is no solid, generated block.
    NoBlockAt(Point3<i32>),
    /// A configuration value failed validation.
    InvalidConfig(String),
    /// The configuration file could not be read.
    ConfigIo(io::Error),
    /// The configuration file is not valid JSON for `EngineConfig`.
    ConfigParse(serde_json::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidMass(mass) => {
                write!(f, "mass must be finite and greater than zero, got {}", mass)
            }
            EngineError::ChunkOutOfBounds(position) => write!(
                f,
                "chunk ({}, {}, {}) is outside the world",
                position.x, position.y, position.z
            ),
            EngineError::NoBlockAt(position) => write!(
                f,
                "no block at ({}, {}, {})",
                position.x, position.y, position.z
            ),
            EngineError::InvalidConfig(detail) => write!(f, "invalid configuration: {}", detail),
            EngineError::ConfigIo(error) => write!(f, "could not read configuration: {}", error),
            EngineError::ConfigParse(error) => {
                write!(f, "could not parse configuration: {}", error)
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineError::ConfigIo(error) => Some(error),
            EngineError::ConfigParse(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(error: io::Error) -> Self {
        EngineError::ConfigIo(error)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(error: serde_json::Error) -> Self {
        EngineError::ConfigParse(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_chunk() {
        let error = EngineError::ChunkOutOfBounds(Point3::new(-1, 2, 300));
        assert_eq!(error.to_string(), "chunk (-1, 2, 300) is outside the world");
    }

    #[test]
    fn parse_errors_keep_their_source() {
        let parse_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = EngineError::from(parse_error);
        assert!(error.source().is_some());
        assert!(EngineError::InvalidMass(0.0).source().is_none());
    }
}
