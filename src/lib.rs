#![doc = include_str!("../README.md")]

// private mods (will be partly re-exported)
mod buffer;
mod error;
mod specs;

// public, flat re-exports
pub use error::{BoundsKind, ConfigParameter, Error};

pub use buffer::{cursor::StreamCursor, transform::DownsamplingMode, AudioBuffer};
pub use specs::BufferSpecs;
