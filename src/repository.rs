use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::convert;
use crate::error::ReadError;
use crate::resource::ResourceReader;
use crate::value::JsonValue;

/// Observable state of one load-and-parse attempt.
///
/// Within a single invocation the sequence is monotonic:
/// `Loading` then exactly one of `Success`/`Error`. `Idle` is the
/// before-any-invocation state held by consumers; the pipeline never
/// emits it. Re-invoking produces a fresh sequence, independent of any
/// earlier one.
#[derive(Debug, Clone)]
pub enum LoadState {
    Idle,
    Loading,
    Success { raw: String, value: JsonValue },
    Error { message: String, source: Arc<ReadError> },
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }
}

/// Orchestrates the read-then-parse pipeline over an injected
/// [`ResourceReader`].
///
/// Built without a reader (the platform context never arrived), every
/// load fails fast with [`ReadError::NotInitialized`] before touching
/// any I/O.
#[derive(Clone)]
pub struct JsonRepository {
    reader: Option<Arc<dyn ResourceReader>>,
}

impl JsonRepository {
    pub fn new(reader: Arc<dyn ResourceReader>) -> Self {
        Self { reader: Some(reader) }
    }

    /// A repository with no platform context; loads report `NotInitialized`.
    pub fn uninitialized() -> Self {
        Self { reader: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.reader.is_some()
    }

    /// Read the named resource and convert it, emitting `Loading` followed
    /// by exactly one terminal state.
    ///
    /// Each call spawns its own task and returns its own stream; concurrent
    /// calls never share state. Dropping the stream stops observation but
    /// does not cancel an in-flight read.
    pub fn load_and_parse(&self, name: &str) -> ReceiverStream<LoadState> {
        let (tx, rx) = mpsc::channel(2);
        let reader = self.reader.clone();
        let name = name.to_string();
        tokio::spawn(async move {
            // send failures mean the consumer stopped observing; fine either way
            let _ = tx.send(LoadState::Loading).await;
            let _ = tx.send(run(reader, &name).await).await;
        });
        ReceiverStream::new(rx)
    }

    /// Read the named resource without converting it.
    pub async fn read_raw(&self, name: &str) -> Result<String, ReadError> {
        match &self.reader {
            Some(reader) => reader.read(name).await,
            None => Err(ReadError::NotInitialized),
        }
    }
}

async fn run(reader: Option<Arc<dyn ResourceReader>>, name: &str) -> LoadState {
    let raw = match &reader {
        Some(reader) => match reader.read(name).await {
            Ok(raw) => raw,
            Err(err) => return read_failed(name, err),
        },
        None => return read_failed(name, ReadError::NotInitialized),
    };

    match convert::parse_object(&raw) {
        Ok(value) => {
            debug!("{name}: loaded {} bytes", raw.len());
            LoadState::Success { raw, value }
        }
        Err(err) => {
            debug!("{name}: parse failed: {err}");
            LoadState::Error {
                message: format!("Failed to parse JSON: {err}"),
                source: Arc::new(err),
            }
        }
    }
}

fn read_failed(name: &str, err: ReadError) -> LoadState {
    debug!("{name}: read failed: {err}");
    LoadState::Error {
        message: format!("Failed to read JSON file: {err}"),
        source: Arc::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::resource::{FsResourceReader, ResourceContext};
    use std::fs;
    use tempfile::TempDir;
    use tokio_stream::StreamExt;

    fn repository(bundle: &TempDir) -> JsonRepository {
        let reader = FsResourceReader::new(
            ResourceContext::new()
                .with_bundle_dir(bundle.path())
                .with_documents_dir(bundle.path().join("docs")),
        );
        JsonRepository::new(Arc::new(reader))
    }

    async fn collect(mut stream: ReceiverStream<LoadState>) -> Vec<LoadState> {
        let mut states = Vec::new();
        while let Some(state) = stream.next().await {
            states.push(state);
        }
        states
    }

    #[tokio::test]
    async fn test_success_sequence() {
        let bundle = TempDir::new().unwrap();
        fs::write(
            bundle.path().join("sample.json"),
            r#"{"title": "Sample Document", "count": 2}"#,
        )
        .unwrap();

        let states = collect(repository(&bundle).load_and_parse("sample.json")).await;
        assert_eq!(states.len(), 2);
        assert!(matches!(states[0], LoadState::Loading));
        match &states[1] {
            LoadState::Success { raw, value } => {
                assert!(raw.contains("Sample Document"));
                assert_eq!(value["title"].as_str(), Some("Sample Document"));
                assert_eq!(value["count"].as_i64(), Some(2));
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_resource_reports_read_failure() {
        let bundle = TempDir::new().unwrap();

        let states = collect(repository(&bundle).load_and_parse("missing.json")).await;
        assert!(matches!(states[0], LoadState::Loading));
        match &states[1] {
            LoadState::Error { message, source } => {
                assert!(message.starts_with("Failed to read JSON file:"));
                assert!(message.contains("missing.json"));
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_content_reports_parse_failure() {
        let bundle = TempDir::new().unwrap();
        fs::write(bundle.path().join("bad.json"), "not json").unwrap();

        let states = collect(repository(&bundle).load_and_parse("bad.json")).await;
        match &states[1] {
            LoadState::Error { message, source } => {
                assert!(message.starts_with("Failed to parse JSON:"));
                assert_eq!(source.kind(), ErrorKind::Syntax);
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_object_root_reports_parse_failure() {
        let bundle = TempDir::new().unwrap();
        fs::write(bundle.path().join("arr.json"), "[1, 2, 3]").unwrap();

        let states = collect(repository(&bundle).load_and_parse("arr.json")).await;
        match &states[1] {
            LoadState::Error { message, source } => {
                assert!(message.starts_with("Failed to parse JSON:"));
                assert_eq!(source.kind(), ErrorKind::NotAnObject);
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_uninitialized_fails_fast() {
        let repo = JsonRepository::uninitialized();
        assert!(!repo.is_initialized());

        let states = collect(repo.load_and_parse("sample.json")).await;
        assert!(matches!(states[0], LoadState::Loading));
        match &states[1] {
            LoadState::Error { source, .. } => {
                assert_eq!(source.kind(), ErrorKind::NotInitialized);
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_independent() {
        let bundle = TempDir::new().unwrap();
        fs::write(bundle.path().join("sample.json"), r#"{"n": 1}"#).unwrap();

        let repo = repository(&bundle);
        let (a, b) = tokio::join!(
            collect(repo.load_and_parse("sample.json")),
            collect(repo.load_and_parse("sample.json")),
        );
        for states in [a, b] {
            assert_eq!(states.len(), 2);
            assert!(matches!(states[0], LoadState::Loading));
            assert!(matches!(states[1], LoadState::Success { .. }));
        }
    }

    #[tokio::test]
    async fn test_reinvocation_resets_after_error() {
        let bundle = TempDir::new().unwrap();
        let repo = repository(&bundle);

        let first = collect(repo.load_and_parse("sample.json")).await;
        assert!(matches!(first[1], LoadState::Error { .. }));

        fs::write(bundle.path().join("sample.json"), r#"{"ok": true}"#).unwrap();
        let second = collect(repo.load_and_parse("sample.json")).await;
        match &second[1] {
            LoadState::Success { value, .. } => assert_eq!(value["ok"].as_bool(), Some(true)),
            other => panic!("expected Success after retry, got {other:?}"),
        }
    }
}
