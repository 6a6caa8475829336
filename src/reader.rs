use std::any::Any;
use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;

use crate::convert;
use crate::error::ReadError;
use crate::repository::{JsonRepository, LoadState};
use crate::resource::ResourceReader;
use crate::typed::TypedParser;
use crate::value::JsonValue;

/// Public entry point composing the resource reader, the converter, and
/// the optional typed-parse capability. Pure delegation; holds no state
/// of its own beyond the wiring.
pub struct JsonReader {
    repository: JsonRepository,
    typed: Option<Arc<dyn TypedParser>>,
}

impl JsonReader {
    pub fn builder() -> JsonReaderBuilder {
        JsonReaderBuilder::default()
    }

    /// Load and convert the named resource, observing the state sequence
    /// (`Loading`, then `Success` or `Error`).
    pub fn load(&self, name: &str) -> ReceiverStream<LoadState> {
        self.repository.load_and_parse(name)
    }

    /// Read the named resource's raw text, skipping conversion.
    pub async fn read_raw(&self, name: &str) -> Result<String, ReadError> {
        self.repository.read_raw(name).await
    }

    /// Parse JSON text into a value tree. Pure and synchronous; the root
    /// must be an object.
    pub fn parse(&self, text: &str) -> Result<JsonValue, ReadError> {
        convert::parse_object(text)
    }

    /// Parse JSON text into the type registered under `type_name`, if a
    /// typed-parse capability was installed. Without one this fails with
    /// [`ReadError::Unsupported`] and has no effect on any load in flight.
    pub fn parse_to_type(
        &self,
        type_name: &str,
        text: &str,
    ) -> Result<Box<dyn Any + Send>, ReadError> {
        match &self.typed {
            Some(typed) => typed.parse_named(type_name, text),
            None => Err(ReadError::Unsupported),
        }
    }

    pub fn supports_typed_parse(&self) -> bool {
        self.typed.is_some()
    }
}

/// Wiring for [`JsonReader`]. A reader built without a `ResourceReader`
/// is still usable: `parse` works, and `load` terminates with the
/// `NotInitialized` error state instead of crashing.
#[derive(Default)]
pub struct JsonReaderBuilder {
    resource: Option<Arc<dyn ResourceReader>>,
    typed: Option<Arc<dyn TypedParser>>,
}

impl JsonReaderBuilder {
    pub fn resource_reader(mut self, reader: Arc<dyn ResourceReader>) -> Self {
        self.resource = Some(reader);
        self
    }

    pub fn typed_parser(mut self, typed: Arc<dyn TypedParser>) -> Self {
        self.typed = Some(typed);
        self
    }

    pub fn build(self) -> JsonReader {
        let repository = match self.resource {
            Some(reader) => JsonRepository::new(reader),
            None => JsonRepository::uninitialized(),
        };
        JsonReader {
            repository,
            typed: self.typed,
        }
    }
}
