use std::io::Write;
use std::path::Path;

use revere_config::{load_config, ConfigError};

fn write_doc(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("revere.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn loads_a_complete_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(
        &dir,
        r#"
statuspage:
  apiKey: key-123
  pageID: page-1
  components:
    - name: api
      startDate: "2024-01-01"
pubsub:
  projectID: proj
  subscriptionID: sub
"#,
    );

    let config = load_config(&path, false).expect("should load");
    assert_eq!(config.statuspage.page_id, "page-1");
    assert_eq!(config.statuspage.components.len(), 1);
    assert_eq!(config.client.redirects, 3);
    assert_eq!(config.api.port, 8080);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_config(Path::new("/nonexistent/revere.yaml"), false).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(&dir, "statuspage: [this is not a mapping");
    let err = load_config(&path, false).unwrap_err();
    assert!(matches!(err, ConfigError::YamlParse { .. }));
}

#[test]
fn missing_required_field_fails_after_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(
        &dir,
        r#"
statuspage:
  pageID: page-1
pubsub:
  projectID: proj
  subscriptionID: sub
"#,
    );
    let err = load_config(&path, false).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("statuspage.apiKey")));
}
