//! Fixed-capacity typed resource registries.
//!
//! A registry maps bounded references to records produced by a [`Reader`].
//! Capacity and the invalid sentinel are properties of the reference type,
//! declared with [`define_ref!`].
//!
//! # Modules
//!
//! - [`reference`] - [`SlotRef`] and the `define_ref!` macro
//! - [`slots`] - [`SlotTable`] storage
//! - [`reader`] - [`Reader`] and bundled readers
//! - [`registry`] - [`ResourceRegistry`] load/unload/query engine
//! - [`shared`] - [`SharedRegistry`] lock-guarded handle
//! - [`instance`] - [`RegistryInstance`] process-wide holder
//!
//! # Example
//!
//! ```
//! use tessel_registry::{MemoryReader, ResourceRegistry, SlotRef};
//!
//! tessel_registry::define_ref! {
//! 	pub struct FontRef; capacity = 4;
//! }
//!
//! let reader = MemoryReader::new().with("mono", "Iosevka".to_string());
//! let mut fonts = ResourceRegistry::<String, FontRef, _>::new("fonts", reader);
//! fonts.initialize();
//!
//! let mono = fonts.find_free_reference().unwrap();
//! fonts.load(mono, "mono").unwrap();
//! assert_eq!(fonts.get(mono).map(String::as_str), Some("Iosevka"));
//! assert!(fonts.get(FontRef::INVALID).is_none());
//! ```

pub mod config;
pub mod error;
pub mod instance;
pub mod reader;
pub mod reference;
pub mod registry;
pub mod shared;
pub mod slots;

pub use config::RegistryConfig;
pub use error::{BoxError, RegistryError, Result};
pub use instance::RegistryInstance;
pub use reader::{FnReader, FormatReader, JsonReader, MemoryReader, ReadError, Reader, TomlReader};
pub use reference::SlotRef;
pub use registry::{Lifecycle, LoadReport, ResourceRegistry};
pub use shared::SharedRegistry;
pub use slots::SlotTable;
