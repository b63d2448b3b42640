use anyhow::Result;
use tempfile::TempDir;

use docscope::commands::query::{execute, open_engine};
use docscope::symbol::{CollisionPolicy, QueryRequest, QueryResponse};
use docscope::{Config, DocEngine, IndexError, JsonFileSource, LoadError, SourceError, StaticSource};

use crate::helpers::test_utils::fixture_path;

#[test]
fn test_load_from_json_file_source() -> Result<()> {
    let mut engine = DocEngine::new();
    engine.load_from(&JsonFileSource::new(fixture_path()))?;

    assert_eq!(engine.len(), 23);
    assert_eq!(engine.find_by_path("my-lib.core.Color.Red")?.map(|e| e.id), Some(16));
    Ok(())
}

#[test]
fn test_missing_file_is_a_load_failure() {
    let temp_dir = TempDir::new().unwrap();
    let mut engine = DocEngine::new();

    let err = engine
        .load_from(&JsonFileSource::new(temp_dir.path().join("api.json")))
        .unwrap_err();
    assert!(matches!(
        err,
        IndexError::Load(LoadError::Source(SourceError::Io { .. }))
    ));
    assert!(!engine.is_loaded());
}

#[test]
fn test_null_export_is_missing_root() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("api.json");
    std::fs::write(&path, "null")?;

    let mut engine = DocEngine::new();
    let err = engine.load_from(&JsonFileSource::new(&path)).unwrap_err();
    assert!(matches!(err, IndexError::Load(LoadError::MissingRoot)));
    Ok(())
}

#[test]
fn test_node_without_id_is_malformed() {
    let mut engine = DocEngine::new();
    let source = StaticSource::new(serde_json::json!({
        "id": 1, "name": "Lib",
        "children": [{ "name": "orphan" }]
    }));

    let err = engine.load_from(&source).unwrap_err();
    assert!(matches!(err, IndexError::Load(LoadError::Malformed(_))));
}

#[test]
fn test_config_collision_policy_applies() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = Config::default();
    config.index.path_collisions = CollisionPolicy::Reject;
    config.save(temp_dir.path())?;

    let loaded = Config::load(temp_dir.path())?;
    assert!(open_engine(&loaded, &fixture_path()).is_err());

    let engine = open_engine(&Config::default(), &fixture_path())?;
    assert!(engine.is_loaded());
    Ok(())
}

#[test]
fn test_execute_reads_configured_source() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::create_dir_all(temp_dir.path().join("docs"))?;
    std::fs::copy(fixture_path(), temp_dir.path().join("docs").join("api.json"))?;

    let config = Config::load(temp_dir.path())?;
    let source_path = config.source_path(temp_dir.path());

    let response = execute(&config, &source_path, QueryRequest::Stats)?;
    match response {
        QueryResponse::Stats(stats) => assert_eq!(stats.total, 23),
        other => panic!("unexpected response {:?}", other),
    }
    Ok(())
}
