use std::sync::Arc;

use docscope::symbol::{CollisionPolicy, ProjectStats, QueryRequest, QueryResponse, SymbolSearcher};
use docscope::{DocEngine, IndexError, LoadError, MatchMode, ReflectionKind};

use crate::helpers::test_utils::{fixture_path, sample_engine};

fn ids(entries: &[docscope::SymbolEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.id).collect()
}

#[test]
fn test_sample_project_stats() {
    let engine = sample_engine();

    assert_eq!(
        engine.stats().unwrap(),
        ProjectStats {
            modules: 2,
            classes: 1,
            interfaces: 1,
            functions: 2,
            variables: 2,
            type_aliases: 1,
            enums: 1,
            total: 23,
        }
    );
}

#[test]
fn test_parameters_are_opaque_payload() {
    let engine = sample_engine();

    // Parameters live outside children/signatures and are not indexed
    assert!(engine.get(23).unwrap().is_none());

    let signature = engine.get(8).unwrap().unwrap();
    assert_eq!(signature.extra["parameters"][0]["name"], "target");
}

#[test]
fn test_paths_in_sample_project() {
    let engine = sample_engine();

    let cases = [
        ("my-lib", 0),
        ("my-lib.core", 1),
        ("my-lib.core.Widget", 2),
        ("my-lib.core.Widget.constructor.new Widget", 4),
        ("my-lib.core.WidgetOptions.debug", 11),
        ("my-lib.core.Color.Green", 17),
        ("my-lib.utils.render", 20),
        ("my-lib.utils.render.render", 21),
    ];

    for (path, id) in cases {
        let entry = engine.find_by_path(path).unwrap();
        assert_eq!(entry.map(|e| e.id), Some(id), "path {}", path);
    }

    assert!(engine.find_by_path("my-lib.core.Gadget").unwrap().is_none());
    assert!(engine.find_by_path("core.Widget").unwrap().is_none());
}

#[test]
fn test_overloaded_signatures_share_a_path() {
    let engine = sample_engine();

    assert_eq!(engine.path_of_id(7).unwrap(), Some("my-lib.core.Widget.render.render"));
    assert_eq!(engine.path_of_id(8).unwrap(), Some("my-lib.core.Widget.render.render"));

    // The second overload was visited last and owns the path
    let entry = engine
        .find_by_path("my-lib.core.Widget.render.render")
        .unwrap()
        .unwrap();
    assert_eq!(entry.id, 8);
}

#[test]
fn test_find_by_name_modes() {
    let engine = sample_engine();

    let exact = engine.find_by_name("render", MatchMode::Exact).unwrap();
    assert_eq!(ids(&exact), vec![6, 7, 8, 20, 21]);
    assert_eq!(exact[0].kind_label, "Method");
    assert_eq!(exact[3].path, "my-lib.utils.render");

    // Buckets come in first-seen order, ids within a bucket in discovery order
    let partial = engine.find_by_name("widget", MatchMode::Partial).unwrap();
    assert_eq!(ids(&partial), vec![2, 4, 9, 12, 13, 14]);

    let prefix = engine.find_by_name("widget", MatchMode::Prefix).unwrap();
    assert_eq!(ids(&prefix), vec![2, 9, 14]);

    assert!(engine.find_by_name("Render", MatchMode::Exact).unwrap().is_empty());
}

#[test]
fn test_find_by_kind_in_discovery_order() {
    let engine = sample_engine();

    let signatures = engine.find_by_kind(ReflectionKind::CallSignature).unwrap();
    assert_eq!(ids(&signatures), vec![7, 8, 13, 21]);

    let properties = engine.find_by_kind(ReflectionKind::Property).unwrap();
    assert_eq!(ids(&properties), vec![5, 10, 11]);

    assert!(engine.find_by_kind(ReflectionKind::Accessor).unwrap().is_empty());
}

#[test]
fn test_tag_filters() {
    let engine = sample_engine();

    let deprecated: Vec<_> = engine.entries_tagged("@deprecated").unwrap().map(|e| e.id).collect();
    assert_eq!(deprecated, vec![13]);

    let beta: Vec<_> = engine.entries_tagged("beta").unwrap().map(|e| e.path).collect();
    assert_eq!(beta, vec!["my-lib.core.WidgetOptions.debug".to_string()]);

    let documented = engine
        .entries_where(|node| node.comment.is_some())
        .unwrap()
        .count();
    assert_eq!(documented, 5);
}

#[test]
fn test_parent_and_children() {
    let engine = sample_engine();

    assert_eq!(engine.parent_of(13).unwrap().unwrap().name, "createWidget");
    assert!(engine.parent_of(0).unwrap().is_none());

    let members = engine.children_of(2).unwrap().unwrap();
    let names: Vec<_> = members.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["constructor", "name", "render"]);
}

#[test]
fn test_comment_summary_is_available_on_entries() {
    let engine = sample_engine();

    let widget = engine.resolve(2).unwrap().unwrap();
    let comment = widget.node.comment.as_ref().unwrap();
    assert_eq!(comment.summary_text(), "A drawable UI element. See WidgetOptions");
}

#[test]
fn test_reject_policy_refuses_sample_project() {
    let content = std::fs::read_to_string(fixture_path()).unwrap();
    let mut engine = DocEngine::with_collision_policy(CollisionPolicy::Reject);

    let err = engine.load_json(&content).unwrap_err();
    match err {
        IndexError::Load(LoadError::PathCollision { path, existing, incoming }) => {
            assert_eq!(path, "my-lib.core.Widget.render.render");
            assert_eq!((existing, incoming), (7, 8));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!engine.is_loaded());
}

#[test]
fn test_warn_policy_still_overwrites() {
    let content = std::fs::read_to_string(fixture_path()).unwrap();
    let mut engine = DocEngine::with_collision_policy(CollisionPolicy::Warn);
    engine.load_json(&content).unwrap();

    let entry = engine
        .find_by_path("my-lib.core.Widget.render.render")
        .unwrap()
        .unwrap();
    assert_eq!(entry.id, 8);
}

#[test]
fn test_searcher_over_sample_project() {
    let searcher = SymbolSearcher::new(Arc::new(sample_engine()), 2);

    match searcher
        .execute(QueryRequest::Suggest {
            name: "craeteWidget".to_string(),
            max_distance: None,
        })
        .unwrap()
    {
        QueryResponse::Suggestions(suggestions) => {
            assert_eq!(suggestions.len(), 1);
            assert_eq!(suggestions[0].name, "createWidget");
            assert_eq!(suggestions[0].occurrences, 2);
        }
        other => panic!("unexpected response {:?}", other),
    }

    match searcher
        .execute(QueryRequest::FindByKind {
            kind: "enumeration member".to_string(),
        })
        .unwrap()
    {
        QueryResponse::Symbols(symbols) => assert_eq!(ids(&symbols), vec![16, 17]),
        other => panic!("unexpected response {:?}", other),
    }
}
