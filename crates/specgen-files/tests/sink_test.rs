//! Regeneration behavior of the filesystem sink.

use specgen_codegen::{CodeGenerator, GeneratedCode, GeneratedFile, Sink};
use specgen_core::{GeneratorConfig, Spec};
use specgen_files::FileSystemSink;
use std::fs;
use tempfile::TempDir;

fn spec() -> Spec {
    serde_json::from_value(serde_json::json!({
        "name": "shop",
        "versions": [{
            "name": "v1",
            "apis": [{
                "name": "orders",
                "operations": [{
                    "name": "get_order",
                    "endpoint": {
                        "method": "GET",
                        "url": "/orders/{id}",
                        "url_params": [{ "name": "id", "type": "int64" }]
                    },
                    "responses": [{ "status": "ok", "body": { "json": "Order" } }]
                }]
            }],
            "models": [{ "name": "Order", "kind": { "object": { "fields": [
                { "name": "id", "type": "int64" }
            ] } } }]
        }]
    }))
    .unwrap()
}

#[test]
fn test_service_tree_on_disk() {
    let temp = TempDir::new().unwrap();
    let code = CodeGenerator::new(GeneratorConfig::default())
        .unwrap()
        .generate_service(&spec())
        .unwrap();

    let report = FileSystemSink::new(temp.path()).accept(&code).unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(report.written.len(), code.file_count());
    for file in code.files() {
        let on_disk = fs::read_to_string(temp.path().join(file.path())).unwrap();
        assert_eq!(on_disk, file.content(), "{}", file.path());
    }
}

#[test]
fn test_regeneration_keeps_edited_scaffolds() {
    let temp = TempDir::new().unwrap();
    let generator = CodeGenerator::new(GeneratorConfig::default()).unwrap();
    let mut sink = FileSystemSink::new(temp.path());
    sink.accept(&generator.generate_service(&spec()).unwrap())
        .unwrap();

    let implementation = temp.path().join("src/services/v1/orders.rs");
    fs::write(&implementation, "// hand written").unwrap();
    let models = temp.path().join("src/spec/v1/models.rs");
    fs::write(&models, "// stale").unwrap();

    let report = sink
        .accept(&generator.generate_service(&spec()).unwrap())
        .unwrap();

    assert_eq!(fs::read_to_string(&implementation).unwrap(), "// hand written");
    assert_ne!(fs::read_to_string(&models).unwrap(), "// stale");
    assert_eq!(
        report.skipped,
        [
            "src/services/mod.rs",
            "src/services/v1/mod.rs",
            "src/services/v1/orders.rs",
        ]
    );
}

#[test]
fn test_removed_scaffold_is_recreated() {
    let temp = TempDir::new().unwrap();
    let mut code = GeneratedCode::new();
    code.add_file(GeneratedFile::scaffolded("src/services/mod.rs", "pub mod v1;\n"));
    let mut sink = FileSystemSink::new(temp.path());

    sink.accept(&code).unwrap();
    fs::remove_file(temp.path().join("src/services/mod.rs")).unwrap();
    let report = sink.accept(&code).unwrap();

    assert_eq!(report.written, ["src/services/mod.rs"]);
    assert!(temp.path().join("src/services/mod.rs").exists());
}

#[test]
fn test_absolute_path_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut code = GeneratedCode::new();
    code.add_file(GeneratedFile::generated("/etc/spec.rs", ""));

    let err = FileSystemSink::new(temp.path()).accept(&code).unwrap_err();

    assert!(err.is_invalid_path());
    assert!(err.to_string().contains("/etc/spec.rs"));
}
