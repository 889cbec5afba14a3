//! Particle and character profiles.
//!
//! Each profile kind lives in its own fixed-capacity registry from
//! `tessel-registry`, read from TOML or JSON files by extension.
//! [`ProfileSystem`] builds, preloads and tears down the registries; consumers
//! receive cloned handles rather than reaching for globals.

pub mod character;
pub mod config;
pub mod error;
pub mod particle;
pub mod system;

pub use character::{CharacterProfile, CharacterRef};
pub use config::{ManifestEntry, ProfilesConfig};
pub use error::{ProfileError, Result};
pub use particle::{ParticleProfile, ParticleRef};
pub use system::{CharacterRegistry, ParticleRegistry, PreloadSummary, ProfileSystem};
