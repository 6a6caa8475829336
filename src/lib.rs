//! jread — load a JSON document from a named resource and convert it into
//! a generic, introspectable value tree.
//!
//! The pipeline runs one direction: name → [`ResourceReader`] → raw text →
//! conversion → [`JsonValue`], with [`LoadState`] transitions observable at
//! each stage. Compose everything through [`JsonReader::builder`].

pub mod convert;
pub mod error;
pub mod reader;
pub mod repository;
pub mod resource;
pub mod typed;
pub mod value;

pub use error::{ErrorKind, ReadError};
pub use reader::{JsonReader, JsonReaderBuilder};
pub use repository::{JsonRepository, LoadState};
pub use resource::{FsResourceReader, ResourceContext, ResourceLocation, ResourceReader};
pub use typed::{TypeRegistry, TypedParser};
pub use value::JsonValue;
