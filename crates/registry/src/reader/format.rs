//! Serde-backed file readers.

use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{ReadError, Reader};

fn read_bytes(path: &Path) -> Result<Vec<u8>, ReadError> {
	std::fs::read(path).map_err(|error| ReadError::Io {
		path: path.to_path_buf(),
		error,
	})
}

fn read_string(path: &Path) -> Result<String, ReadError> {
	std::fs::read_to_string(path).map_err(|error| ReadError::Io {
		path: path.to_path_buf(),
		error,
	})
}

macro_rules! marker_reader {
	($(#[$attr:meta])* $name:ident) => {
		$(#[$attr])*
		pub struct $name<T> {
			_record: PhantomData<fn() -> T>,
		}

		impl<T> $name<T> {
			/// Creates the reader.
			pub const fn new() -> Self {
				Self {
					_record: PhantomData,
				}
			}
		}

		impl<T> Default for $name<T> {
			fn default() -> Self {
				Self::new()
			}
		}

		impl<T> Clone for $name<T> {
			fn clone(&self) -> Self {
				*self
			}
		}

		impl<T> Copy for $name<T> {}

		impl<T> core::fmt::Debug for $name<T> {
			fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
				f.write_str(stringify!($name))
			}
		}
	};
}

marker_reader! {
	/// Deserializes records from TOML files.
	TomlReader
}

marker_reader! {
	/// Deserializes records from JSON files.
	JsonReader
}

marker_reader! {
	/// Picks [`TomlReader`] or [`JsonReader`] from the file extension.
	FormatReader
}

impl<T: DeserializeOwned> Reader<T> for TomlReader<T> {
	type Error = ReadError;

	fn read(&self, source: &Path) -> Result<T, ReadError> {
		let text = read_string(source)?;
		toml::from_str(&text).map_err(|error| ReadError::Toml {
			path: source.to_path_buf(),
			error,
		})
	}
}

impl<T: DeserializeOwned> Reader<T> for JsonReader<T> {
	type Error = ReadError;

	fn read(&self, source: &Path) -> Result<T, ReadError> {
		let bytes = read_bytes(source)?;
		serde_json::from_slice(&bytes).map_err(|error| ReadError::Json {
			path: source.to_path_buf(),
			error,
		})
	}
}

impl<T: DeserializeOwned> Reader<T> for FormatReader<T> {
	type Error = ReadError;

	fn read(&self, source: &Path) -> Result<T, ReadError> {
		match source.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => TomlReader::<T>::new().read(source),
			Some("json") => JsonReader::<T>::new().read(source),
			_ => Err(ReadError::UnsupportedFormat {
				path: source.to_path_buf(),
			}),
		}
	}
}
