// Integration tests for the versioned schema cache
// Covers cache hits, misses, unavailable versions and corrupt artifacts

use ecsfit_core::errors::{ExError, ExErrorKind, FieldCheckError};
use ecsfit_store::cache::{SchemaCache, SchemaCacheConfig, SCHEMA_ARTIFACT_FILE};
use ecsfit_store::SchemaSource;
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const FLAT_V1: &str = r#"
host.name:
  dashed_name: host-name
  description: Name of the host.
  flat_name: host.name
  level: core
  name: name
  normalize: []
  short: Name of the host.
  type: keyword
event.duration:
  flat_name: event.duration
  level: core
  name: duration
  type: long
  example: 1000
"#;

const FLAT_V2: &str = r#"
host.name:
  flat_name: host.name
  type: keyword
http.request.method:
  flat_name: http.request.method
  type: keyword
  normalize:
    - array
"#;

/// In-memory source counting every fetch
struct FakeSource {
    artifacts: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl FakeSource {
    fn new(artifacts: &[(&str, &str)]) -> Self {
        Self {
            artifacts: artifacts
                .iter()
                .map(|(v, a)| (v.to_string(), a.to_string()))
                .collect(),
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SchemaSource for FakeSource {
    fn location(&self, version: &str) -> String {
        format!("memory://{version}/ecs_flat.yml")
    }

    fn fetch(&self, version: &str) -> ecsfit_store::Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.artifacts.get(version) {
            Some(artifact) => Ok(artifact.as_bytes().to_vec()),
            None => Err(ExError::from(FieldCheckError::SchemaUnavailable {
                version: version.to_string(),
                url: self.location(version),
            })),
        }
    }
}

fn setup_cache(source: FakeSource) -> (TempDir, SchemaCache<FakeSource>) {
    let dir = TempDir::new().expect("Failed to create temp cache directory");
    let config = SchemaCacheConfig::default().with_cache_root(dir.path().join("cache"));
    (dir, SchemaCache::new(config, source))
}

#[test]
fn test_miss_fetches_and_persists() {
    // Given: An empty cache
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1)]));
    assert!(!cache.is_cached("v1").unwrap());

    // When: A version is requested
    let dictionary = cache.get("v1").unwrap();

    // Then: The dictionary is parsed and the artifact is on disk verbatim
    assert_eq!(dictionary.version(), "v1");
    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.get("event.duration").unwrap().field_type, "long");
    assert_eq!(
        dictionary.get("event.duration").unwrap().example.as_deref(),
        Some("1000")
    );
    let on_disk = fs::read_to_string(cache.artifact_path("v1").unwrap()).unwrap();
    assert_eq!(on_disk, FLAT_V1);
    assert_eq!(cache.source().fetch_count(), 1);
}

#[test]
fn test_hit_does_not_refetch() {
    // Given: A version already fetched once
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1)]));
    let first = cache.get("v1").unwrap();

    // When: It is requested again
    let second = cache.get("v1").unwrap();

    // Then: No second network call and the same dictionary
    assert_eq!(cache.source().fetch_count(), 1);
    assert_eq!(first, second);
}

#[test]
fn test_versions_do_not_collide() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1), ("v2", FLAT_V2)]));

    let v1 = cache.get("v1").unwrap();
    let v2 = cache.get("v2").unwrap();

    assert!(v1.contains("event.duration"));
    assert!(!v2.contains("event.duration"));
    assert!(v2.contains("http.request.method"));
    assert_eq!(
        v2.get("http.request.method").unwrap().normalize,
        vec!["array".to_string()]
    );
    assert_ne!(
        cache.artifact_path("v1").unwrap(),
        cache.artifact_path("v2").unwrap()
    );
}

#[test]
fn test_unavailable_version_propagates_and_writes_nothing() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1)]));

    let err = cache.get("nonexistent-ref").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::SchemaUnavailable);
    assert_eq!(err.version(), Some("nonexistent-ref"));
    assert!(!cache.is_cached("nonexistent-ref").unwrap());
}

#[test]
fn test_corrupt_cached_artifact_is_parse_error() {
    // Given: A cache entry that was truncated on disk
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1)]));
    let path = cache.artifact_path("v1").unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "host.name: [unterminated\n").unwrap();

    // When: The version is requested
    let err = cache.get("v1").unwrap_err();

    // Then: A parse error naming the file; no fetch; file left in place
    assert_eq!(err.kind(), ExErrorKind::SchemaParse);
    assert_eq!(err.path(), Some(path.display().to_string().as_str()));
    assert_eq!(cache.source().fetch_count(), 0);
    assert!(path.exists());
}

#[test]
fn test_fresh_artifact_that_fails_to_parse_is_still_persisted() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[("broken", "- not\n- a mapping\n")]));

    let err = cache.get("broken").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::SchemaParse);
    assert!(cache.is_cached("broken").unwrap());
    assert_eq!(cache.source().fetch_count(), 1);
}

#[test]
fn test_clear_then_get_refetches() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1)]));
    cache.get("v1").unwrap();

    assert!(cache.clear("v1").unwrap());
    assert!(!cache.is_cached("v1").unwrap());
    assert!(!cache.clear("v1").unwrap());

    cache.get("v1").unwrap();
    assert_eq!(cache.source().fetch_count(), 2);
}

#[test]
fn test_clear_all_removes_every_version() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[("v1", FLAT_V1), ("v2", FLAT_V2)]));
    cache.get("v1").unwrap();
    cache.get("v2").unwrap();

    assert!(cache.clear_all().unwrap());

    assert!(!cache.is_cached("v1").unwrap());
    assert!(!cache.is_cached("v2").unwrap());
    assert!(!cache.config().cache_root.exists());
}

#[test]
fn test_nested_ref_maps_to_nested_directory() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[("release/8.x", FLAT_V2)]));

    cache.get("release/8.x").unwrap();

    let expected = cache
        .config()
        .cache_root
        .join("release")
        .join("8.x")
        .join(SCHEMA_ARTIFACT_FILE);
    assert!(expected.is_file());
}

#[test]
fn test_escaping_version_is_rejected_before_io() {
    let (_dir, cache) = setup_cache(FakeSource::new(&[]));

    let err = cache.get("../outside").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(cache.source().fetch_count(), 0);
}
