//! Character profiles.

use serde::{Deserialize, Serialize};

tessel_registry::define_ref! {
	/// Handle to a loaded character profile.
	pub struct CharacterRef; capacity = 32;
}

/// Static attributes of a playable or scripted character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterProfile {
	/// Unique profile name.
	pub name: String,
	/// Starting hit points.
	pub health: u32,
	/// Movement speed multiplier. Defaults to `1.0`.
	#[serde(default = "default_speed")]
	pub speed: f32,
	/// Tile sheet used by the rendering view.
	pub sprite: String,
	/// Names of particle profiles attached to this character.
	#[serde(default)]
	pub particles: Vec<String>,
}

fn default_speed() -> f32 {
	1.0
}
