use std::path::PathBuf;

use docscope::{DocEngine, ReflectionKind, SymbolNode};

/// Path of the sample project export
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_project.json")
}

/// Engine loaded with the sample project export
pub fn sample_engine() -> DocEngine {
    let content = std::fs::read_to_string(fixture_path()).expect("fixture is readable");
    let mut engine = DocEngine::new();
    engine.load_json(&content).expect("fixture loads");
    engine
}

/// `Lib` module with a `Widget` class holding a `render` method
pub fn lib_tree() -> SymbolNode {
    SymbolNode::new(1, "Lib", Some(ReflectionKind::Module)).with_children([
        SymbolNode::new(2, "Widget", Some(ReflectionKind::Class))
            .with_children([SymbolNode::new(3, "render", Some(ReflectionKind::Method))]),
    ])
}

/// A chain of `depth` nested namespaces, ids 0..depth
pub fn deep_chain(depth: u64) -> SymbolNode {
    let mut node = SymbolNode::new(depth - 1, format!("n{}", depth - 1), Some(ReflectionKind::Namespace));
    for id in (0..depth - 1).rev() {
        node = SymbolNode::new(id, format!("n{}", id), Some(ReflectionKind::Namespace)).with_children([node]);
    }
    node
}

/// Every node reachable through children and signatures, in pre-order
pub fn walk(root: &SymbolNode) -> Vec<&SymbolNode> {
    let mut out = vec![root];
    for child in root.children.iter().chain(root.signatures.iter()) {
        out.extend(walk(child));
    }
    out
}
