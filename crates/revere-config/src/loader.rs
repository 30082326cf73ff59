use std::path::Path;

use crate::config::Config;
use crate::error::ConfigError;
use crate::raw::RawConfig;

/// Loads and fully assembles the configuration document at `path`. `verbose`
/// is the CLI's `--verbose` flag, folded over the file's own `verbose` value.
pub fn load_config(path: &Path, verbose: bool) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let raw: RawConfig = serde_yaml::from_str(&content).map_err(|e| ConfigError::YamlParse {
        path: path.display().to_string(),
        source: e,
    })?;
    Config::assemble(raw, verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_minimal_valid_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
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
"#
        )
        .unwrap();

        let config = load_config(file.path(), false).unwrap();
        assert_eq!(config.statuspage.page_id, "page-1");
        assert_eq!(config.pubsub.project_id, "proj");
        assert_eq!(config.client.redirects, 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/revere.yaml"), false).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "statuspage: [this is not a mapping").unwrap();
        let err = load_config(file.path(), false).unwrap_err();
        assert!(matches!(err, ConfigError::YamlParse { .. }));
    }
}
