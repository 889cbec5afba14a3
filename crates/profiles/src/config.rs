//! Profile system configuration.
//!
//! ```toml
//! root = "assets/profiles"
//!
//! [[particles]]
//! slot = 0
//! source = "particles/spark.toml"
//!
//! [[characters]]
//! slot = 0
//! source = "characters/knight.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessel_registry::SlotRef;

use crate::error::{ProfileError, Result};
use crate::{CharacterRef, ParticleRef};

/// One preload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
	/// Target slot.
	pub slot: u32,
	/// Source path, relative to the profile root unless absolute.
	pub source: PathBuf,
}

/// Top-level profile configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilesConfig {
	/// Directory that profile sources are resolved against.
	pub root: PathBuf,
	/// Particle profiles to load on open.
	pub particles: Vec<ManifestEntry>,
	/// Character profiles to load on open.
	pub characters: Vec<ManifestEntry>,
}

impl Default for ProfilesConfig {
	fn default() -> Self {
		Self {
			root: PathBuf::from("."),
			particles: Vec::new(),
			characters: Vec::new(),
		}
	}
}

impl ProfilesConfig {
	/// Parses and validates a TOML string.
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads a config file. A relative `root` is taken relative to the
	/// file's directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ProfileError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let mut config = Self::parse(&text)?;
		if config.root.is_relative()
			&& let Some(dir) = path.parent()
		{
			config.root = dir.join(&config.root);
		}
		tracing::debug!(path = %path.display(), root = %config.root.display(), "profiles.config.loaded");
		Ok(config)
	}

	/// Rejects manifest slots outside the registries' capacities and slots
	/// listed more than once in the same manifest.
	pub fn validate(&self) -> Result<()> {
		check_slots::<ParticleRef>("particles", &self.particles)?;
		check_slots::<CharacterRef>("characters", &self.characters)
	}
}

fn check_slots<R: SlotRef>(registry: &'static str, entries: &[ManifestEntry]) -> Result<()> {
	if let Some(entry) = entries.iter().find(|e| !R::from_raw(e.slot).is_valid()) {
		return Err(ProfileError::SlotOutOfRange {
			registry,
			slot: entry.slot,
			capacity: R::CAPACITY,
		});
	}

	let mut slots: Vec<u32> = entries.iter().map(|e| e.slot).collect();
	slots.sort_unstable();
	match slots.windows(2).find(|pair| pair[0] == pair[1]) {
		Some(pair) => Err(ProfileError::DuplicateSlot {
			registry,
			slot: pair[0],
		}),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_manifest() {
		let config = ProfilesConfig::parse(
			r#"
root = "assets"

[[particles]]
slot = 3
source = "spark.toml"
"#,
		)
		.expect("valid config");

		assert_eq!(config.root, PathBuf::from("assets"));
		assert_eq!(
			config.particles,
			vec![ManifestEntry {
				slot: 3,
				source: PathBuf::from("spark.toml"),
			}]
		);
		assert!(config.characters.is_empty());
	}

	#[test]
	fn empty_config_uses_defaults() {
		assert_eq!(ProfilesConfig::parse("").expect("empty"), ProfilesConfig::default());
	}

	#[test]
	fn rejects_out_of_range_slot() {
		let err = ProfilesConfig::parse(
			r#"
[[characters]]
slot = 32
source = "knight.json"
"#,
		)
		.unwrap_err();

		assert!(matches!(
			err,
			ProfileError::SlotOutOfRange {
				registry: "characters",
				slot: 32,
				capacity: 32,
			}
		));
	}

	#[test]
	fn rejects_repeated_slot() {
		let err = ProfilesConfig::parse(
			r#"
[[particles]]
slot = 0
source = "a.toml"

[[particles]]
slot = 1
source = "b.toml"

[[particles]]
slot = 0
source = "c.toml"
"#,
		)
		.unwrap_err();

		assert!(matches!(
			err,
			ProfileError::DuplicateSlot {
				registry: "particles",
				slot: 0,
			}
		));
	}

	#[test]
	fn same_slot_in_different_registries_is_fine() {
		let config = ProfilesConfig::parse(
			r#"
[[particles]]
slot = 2
source = "spark.toml"

[[characters]]
slot = 2
source = "knight.json"
"#,
		)
		.expect("valid config");

		assert_eq!(config.particles[0].slot, config.characters[0].slot);
	}

	#[test]
	fn rejects_unknown_keys() {
		assert!(matches!(
			ProfilesConfig::parse("roots = \"x\""),
			Err(ProfileError::Config(_))
		));
	}

	#[test]
	fn relative_root_follows_config_file() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let path = dir.path().join("profiles.toml");
		std::fs::write(&path, "root = \"assets\"").expect("write config");

		let config = ProfilesConfig::from_path(&path).expect("valid config");
		assert_eq!(config.root, dir.path().join("assets"));
	}

	#[test]
	fn missing_config_is_io_error() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let err = ProfilesConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
		assert!(matches!(err, ProfileError::Io { .. }));
	}
}
