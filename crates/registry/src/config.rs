//! Source path resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Per-registry settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Directory that relative sources are resolved against.
	pub root: Option<PathBuf>,
}

impl RegistryConfig {
	/// Creates a config resolving relative sources against `root`.
	pub fn with_root(root: impl Into<PathBuf>) -> Self {
		Self {
			root: Some(root.into()),
		}
	}

	/// Resolves `source` against the configured root.
	///
	/// Absolute sources and configs without a root pass through unchanged.
	pub fn resolve(&self, source: &Path) -> PathBuf {
		match &self.root {
			Some(root) if source.is_relative() => root.join(source),
			_ => source.to_path_buf(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relative_sources_join_root() {
		let config = RegistryConfig::with_root("assets/particles");
		assert_eq!(
			config.resolve(Path::new("spark.toml")),
			PathBuf::from("assets/particles/spark.toml")
		);
	}

	#[test]
	fn absolute_sources_pass_through() {
		let dir = tempfile::tempdir().expect("create tempdir");
		let abs = dir.path().join("spark.toml");
		let config = RegistryConfig::with_root("assets");
		assert_eq!(config.resolve(&abs), abs);
		assert_eq!(RegistryConfig::default().resolve(Path::new("x.toml")), PathBuf::from("x.toml"));
	}

	#[test]
	fn parses_from_toml() {
		let config: RegistryConfig = toml::from_str("root = \"profiles\"").expect("valid config");
		assert_eq!(config, RegistryConfig::with_root("profiles"));

		let empty: RegistryConfig = toml::from_str("").expect("empty config");
		assert_eq!(empty.root, None);
	}
}
