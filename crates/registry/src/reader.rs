//! Reader collaborators.
//!
//! A [`Reader`] turns a source path into a fully constructed record. The
//! registry only depends on that signature; formats and schemas live here or
//! in caller crates.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

mod format;

pub use format::{FormatReader, JsonReader, TomlReader};

/// Parses a record of type `T` from a source path.
pub trait Reader<T> {
	/// Error produced when the source cannot be turned into a record.
	type Error: std::error::Error + Send + Sync + 'static;

	/// Reads one record. Called synchronously from `load`.
	fn read(&self, source: &Path) -> Result<T, Self::Error>;
}

impl<T, Rd: Reader<T> + ?Sized> Reader<T> for &Rd {
	type Error = Rd::Error;

	fn read(&self, source: &Path) -> Result<T, Self::Error> {
		(**self).read(source)
	}
}

impl<T, Rd: Reader<T> + ?Sized> Reader<T> for std::sync::Arc<Rd> {
	type Error = Rd::Error;

	fn read(&self, source: &Path) -> Result<T, Self::Error> {
		(**self).read(source)
	}
}

/// Errors produced by the bundled readers.
#[derive(Debug, Error)]
pub enum ReadError {
	/// The source could not be read from disk.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// The source is not valid TOML for the record type.
	#[error("invalid TOML in {}: {error}", path.display())]
	Toml {
		/// Path of the malformed source.
		path: PathBuf,
		/// The deserialization error.
		#[source]
		error: toml::de::Error,
	},

	/// The source is not valid JSON for the record type.
	#[error("invalid JSON in {}: {error}", path.display())]
	Json {
		/// Path of the malformed source.
		path: PathBuf,
		/// The deserialization error.
		#[source]
		error: serde_json::Error,
	},

	/// No reader handles the source's extension.
	#[error("unsupported resource format: {}", path.display())]
	UnsupportedFormat {
		/// Path with the unrecognized extension.
		path: PathBuf,
	},

	/// An in-memory reader has no record for the source.
	#[error("no resource registered for {}", path.display())]
	NotFound {
		/// Requested path.
		path: PathBuf,
	},
}

/// Adapts a closure into a [`Reader`].
pub struct FnReader<F, E> {
	f: F,
	_error: PhantomData<fn() -> E>,
}

impl<F, E> FnReader<F, E> {
	/// Wraps `f`.
	pub fn new(f: F) -> Self {
		Self {
			f,
			_error: PhantomData,
		}
	}
}

impl<T, E, F> Reader<T> for FnReader<F, E>
where
	F: Fn(&Path) -> Result<T, E>,
	E: std::error::Error + Send + Sync + 'static,
{
	type Error = E;

	fn read(&self, source: &Path) -> Result<T, E> {
		(self.f)(source)
	}
}

impl<F, E> core::fmt::Debug for FnReader<F, E> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str("FnReader(..)")
	}
}

/// Serves clones of records registered ahead of time.
///
/// Useful for embedded assets and for driving registries in tests without
/// touching the filesystem.
#[derive(Debug, Clone)]
pub struct MemoryReader<T> {
	entries: FxHashMap<PathBuf, T>,
}

impl<T> MemoryReader<T> {
	/// Creates an empty reader.
	pub fn new() -> Self {
		Self {
			entries: FxHashMap::default(),
		}
	}

	/// Registers `record` under `path`, replacing any previous record.
	pub fn insert(&mut self, path: impl Into<PathBuf>, record: T) -> Option<T> {
		self.entries.insert(path.into(), record)
	}

	/// Builder-style [`MemoryReader::insert`].
	pub fn with(mut self, path: impl Into<PathBuf>, record: T) -> Self {
		self.insert(path, record);
		self
	}

	/// Removes the record registered under `path`.
	pub fn remove(&mut self, path: &Path) -> Option<T> {
		self.entries.remove(path)
	}
}

impl<T> Default for MemoryReader<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Reader<T> for MemoryReader<T> {
	type Error = ReadError;

	fn read(&self, source: &Path) -> Result<T, ReadError> {
		self.entries
			.get(source)
			.cloned()
			.ok_or_else(|| ReadError::NotFound {
				path: source.to_path_buf(),
			})
	}
}
