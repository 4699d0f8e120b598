pub mod config;
pub mod deps;
pub mod error;
pub mod external;
pub mod io;
pub mod patch;
pub mod paths;
pub mod pipeline;
pub mod template;
pub mod toolchain;
pub mod types;
pub mod validate;
pub mod variant;

#[cfg(test)]
mod fixtures;

pub use error::{KickstackError, Result, ValidationFailure};
