//! Configuration file discovery and loading.

use crate::config::schema::NbreqsConfig;
use crate::config::validator::validate;
use crate::error::{NbreqsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".nbreqs.yml";

/// Find the project config at `<root>/.nbreqs.yml`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<NbreqsConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NbreqsError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            NbreqsError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into an [`NbreqsConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<NbreqsConfig> {
    if content.trim().is_empty() {
        return Ok(NbreqsConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| NbreqsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load, normalize and validate the effective configuration.
///
/// An explicit path must exist. Without one, `<root>/.nbreqs.yml` is used
/// when present and the built-in defaults otherwise.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<NbreqsConfig> {
    let path = match explicit {
        Some(p) if p.is_absolute() => Some(p.to_path_buf()),
        Some(p) => Some(root.join(p)),
        None => find_config(root),
    };

    let mut config = match &path {
        Some(p) => {
            tracing::debug!("Loading config from {}", p.display());
            load_config_file(p)?
        }
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            NbreqsConfig::default()
        }
    };

    normalize(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Strip a leading dot from the extension (`.ipynb` → `ipynb`).
pub fn normalize(config: &mut NbreqsConfig) {
    if let Some(stripped) = config.extension.strip_prefix('.') {
        config.extension = stripped.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, NbreqsConfig::default());
    }

    #[test]
    fn discovers_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "jobs: 3\n").unwrap();

        assert!(find_config(temp.path()).is_some());
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.jobs, 3);
    }

    #[test]
    fn explicit_relative_path_resolves_against_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("conf")).unwrap();
        fs::write(temp.path().join("conf/nb.yml"), "notebook_dir: notebooks\n").unwrap();

        let config = load_config(temp.path(), Some(Path::new("conf/nb.yml"))).unwrap();
        assert_eq!(config.notebook_dir, PathBuf::from("notebooks"));
    }

    #[test]
    fn explicit_missing_path_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(Path::new("missing.yml"))).unwrap_err();
        assert!(matches!(err, NbreqsError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "jobs: [1, 2\n").unwrap();

        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, NbreqsError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("   \n", Path::new(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, NbreqsConfig::default());
    }

    #[test]
    fn leading_dot_in_extension_is_stripped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "extension: .ipynb\n").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.extension, "ipynb");
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "jobs: 0\n").unwrap();

        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, NbreqsError::ConfigValidationError { .. }));
    }
}
