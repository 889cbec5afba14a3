//! Profile registries wired for injection into game systems and views.

use tessel_registry::{FormatReader, LoadReport, RegistryConfig, ResourceRegistry, SharedRegistry, SlotRef};

use crate::config::{ManifestEntry, ProfilesConfig};
use crate::{CharacterProfile, CharacterRef, ParticleProfile, ParticleRef};

/// Shared particle profile registry.
pub type ParticleRegistry = SharedRegistry<ParticleProfile, ParticleRef, FormatReader<ParticleProfile>>;

/// Shared character profile registry.
pub type CharacterRegistry = SharedRegistry<CharacterProfile, CharacterRef, FormatReader<CharacterProfile>>;

/// Results of preloading the configured manifests.
#[derive(Debug, Default)]
pub struct PreloadSummary {
	pub particles: LoadReport<ParticleRef>,
	pub characters: LoadReport<CharacterRef>,
}

impl PreloadSummary {
	/// Returns true if every manifest entry loaded.
	pub fn is_complete(&self) -> bool {
		self.particles.is_complete() && self.characters.is_complete()
	}
}

/// Owns one registry per profile kind.
///
/// Handles returned by [`ProfileSystem::particles`] and
/// [`ProfileSystem::characters`] can be cloned into any component that needs
/// read access; they observe `close` like the system itself.
#[derive(Debug, Clone)]
pub struct ProfileSystem {
	particles: ParticleRegistry,
	characters: CharacterRegistry,
}

impl ProfileSystem {
	/// Builds the registries, initializes them and preloads the manifests.
	///
	/// Manifest failures are logged and reported, never fatal.
	pub fn open(config: &ProfilesConfig) -> (Self, PreloadSummary) {
		let registry_config = RegistryConfig::with_root(&config.root);
		let particles = SharedRegistry::new(ResourceRegistry::with_config(
			"particles",
			FormatReader::new(),
			registry_config.clone(),
		));
		let characters = SharedRegistry::new(ResourceRegistry::with_config(
			"characters",
			FormatReader::new(),
			registry_config,
		));

		let system = Self { particles, characters };
		let summary = system.preload(config);
		(system, summary)
	}

	/// Clears and reloads both registries from `config`'s manifests.
	///
	/// The root directory is fixed at [`ProfileSystem::open`].
	pub fn preload(&self, config: &ProfilesConfig) -> PreloadSummary {
		self.particles.initialize();
		self.characters.initialize();
		self.particles.reset();
		self.characters.reset();

		let summary = PreloadSummary {
			particles: self.particles.load_all(manifest(&config.particles)),
			characters: self.characters.load_all(manifest(&config.characters)),
		};
		for (r, err) in &summary.particles.failed {
			tracing::warn!(slot = %r, error = %err, "profiles.preload.failed");
		}
		for (r, err) in &summary.characters.failed {
			tracing::warn!(slot = %r, error = %err, "profiles.preload.failed");
		}
		tracing::info!(
			particles = summary.particles.loaded.len(),
			characters = summary.characters.loaded.len(),
			"profiles.preload"
		);
		summary
	}

	/// Drops every loaded profile.
	pub fn close(&self) {
		self.particles.uninitialize();
		self.characters.uninitialize();
		tracing::debug!("profiles.close");
	}

	/// Particle registry handle.
	pub fn particles(&self) -> &ParticleRegistry {
		&self.particles
	}

	/// Character registry handle.
	pub fn characters(&self) -> &CharacterRegistry {
		&self.characters
	}

	/// Finds the loaded particle profile with the given name.
	pub fn find_particle(&self, name: &str) -> Option<ParticleRef> {
		self.particles
			.read()
			.iter()
			.find(|(_, p)| p.name == name)
			.map(|(r, _)| r)
	}

	/// Resolves the particle profiles attached to a character.
	///
	/// Names without a loaded profile are skipped.
	pub fn character_particles(&self, character: CharacterRef) -> Vec<ParticleRef> {
		let Some(names) = self.characters.with(character, |c| c.particles.clone()) else {
			return Vec::new();
		};
		names.iter().filter_map(|name| self.find_particle(name)).collect()
	}
}

fn manifest<R: SlotRef>(entries: &[ManifestEntry]) -> impl Iterator<Item = (R, &std::path::Path)> {
	entries.iter().map(|e| (R::from_raw(e.slot), e.source.as_path()))
}
