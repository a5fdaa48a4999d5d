#![allow(dead_code)]
use std::path::PathBuf;

use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .is_test(true)
            .init();
    });
}

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Prefixes `body` with the declaration written by a default `NestedXmlWriter`.
pub fn document(body: &str) -> String {
    format!("{}\n{}", XML_DECLARATION, body)
}

pub fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .canonicalize()
        .unwrap()
}

pub fn namespaced_template() -> PathBuf {
    samples_dir().join("namespaced.json")
}

pub fn namespaced_expected() -> PathBuf {
    samples_dir().join("namespaced.xml")
}

pub fn catalog_template() -> PathBuf {
    samples_dir().join("catalog.json")
}

pub fn catalog_indented_expected() -> PathBuf {
    samples_dir().join("catalog_indented.xml")
}
