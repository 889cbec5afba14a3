//! Particle emitter profiles.

use serde::{Deserialize, Serialize};

tessel_registry::define_ref! {
	/// Handle to a loaded particle profile.
	pub struct ParticleRef; capacity = 64;
}

/// Emitter parameters for one particle effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticleProfile {
	/// Display name, also used for lookup by characters.
	pub name: String,
	/// Lifetime of a single particle in milliseconds.
	#[serde(default = "default_lifetime_ms")]
	pub lifetime_ms: u32,
	/// Particles emitted per second.
	#[serde(default)]
	pub emission_rate: f32,
	/// RGBA tint.
	#[serde(default = "default_color")]
	pub color: [u8; 4],
	/// Texture atlas entries cycled over the particle's life.
	#[serde(default)]
	pub textures: Vec<String>,
}

fn default_lifetime_ms() -> u32 {
	1000
}

fn default_color() -> [u8; 4] {
	[255, 255, 255, 255]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_fill_optional_fields() {
		let profile: ParticleProfile = toml::from_str("name = \"dust\"").expect("valid profile");
		assert_eq!(profile.lifetime_ms, 1000);
		assert_eq!(profile.color, [255, 255, 255, 255]);
		assert!(profile.textures.is_empty());
	}

	#[test]
	fn unknown_fields_are_rejected() {
		assert!(toml::from_str::<ParticleProfile>("name = \"dust\"\nspeed = 3").is_err());
	}
}
