use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One configured network: display name, chart color, and the lowercase
/// aliases the chat answerer matches by substring.
///
/// File order is significant: it is the chat matcher's priority order, so the
/// one-letter "X" catch-all must come after the specific network names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct NetworksFile {
    pub networks: Vec<NetworkConfig>,
}

impl NetworksFile {
    /// Display names in priority order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.networks.iter().map(|n| n.name.clone()).collect()
    }
}

/// Load and validate the networks configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_networks(path: &Path) -> Result<NetworksFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::NetworksFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let networks_file: NetworksFile = serde_yaml::from_str(&content)?;

    validate_networks(&networks_file)?;

    Ok(networks_file)
}

fn validate_networks(networks_file: &NetworksFile) -> Result<(), ConfigError> {
    if networks_file.networks.is_empty() {
        return Err(ConfigError::Validation(
            "at least one network must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for network in &networks_file.networks {
        if network.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "network name must be non-empty".to_string(),
            ));
        }

        if !is_hex_color(&network.color) {
            return Err(ConfigError::Validation(format!(
                "network '{}' has invalid color '{}'; expected #rrggbb",
                network.name, network.color
            )));
        }

        let lower_name = network.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate network name: '{}'",
                network.name
            )));
        }

        for alias in &network.aliases {
            if alias.trim().is_empty() || *alias != alias.to_lowercase() {
                return Err(ConfigError::Validation(format!(
                    "network '{}' has invalid alias '{}'; aliases must be non-empty lowercase",
                    network.name, alias
                )));
            }
        }
    }

    Ok(())
}

fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(name: &str, color: &str, aliases: &[&str]) -> NetworkConfig {
        NetworkConfig {
            name: name.to_string(),
            color: color.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn validate_accepts_valid_networks() {
        let file = NetworksFile {
            networks: vec![
                network("LinkedIn", "#0077B5", &["linkedin"]),
                network("X", "#000000", &["twitter", "x"]),
            ],
        };
        assert!(validate_networks(&file).is_ok());
    }

    #[test]
    fn validate_rejects_empty_list() {
        let file = NetworksFile { networks: vec![] };
        let err = validate_networks(&file).unwrap_err();
        assert!(err.to_string().contains("at least one network"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let file = NetworksFile {
            networks: vec![network("  ", "#0077B5", &[])],
        };
        let err = validate_networks(&file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_bad_color() {
        let file = NetworksFile {
            networks: vec![network("LinkedIn", "blue", &[])],
        };
        let err = validate_networks(&file).unwrap_err();
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn validate_rejects_duplicate_name_case_insensitive() {
        let file = NetworksFile {
            networks: vec![
                network("LinkedIn", "#0077B5", &[]),
                network("linkedin", "#FFFFFF", &[]),
            ],
        };
        let err = validate_networks(&file).unwrap_err();
        assert!(err.to_string().contains("duplicate network name"));
    }

    #[test]
    fn validate_rejects_uppercase_alias() {
        let file = NetworksFile {
            networks: vec![network("LinkedIn", "#0077B5", &["LinkedIn"])],
        };
        let err = validate_networks(&file).unwrap_err();
        assert!(err.to_string().contains("invalid alias"));
    }

    #[test]
    fn is_hex_color_requires_hash_and_six_digits() {
        assert!(is_hex_color("#0077B5"));
        assert!(is_hex_color("#000000"));
        assert!(!is_hex_color("0077B5"));
        assert!(!is_hex_color("#07B"));
        assert!(!is_hex_color("#00zzB5"));
    }

    #[test]
    fn load_networks_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("networks.yaml");
        assert!(
            path.exists(),
            "networks.yaml missing at {path:?} — required for this test"
        );
        let result = load_networks(&path);
        assert!(result.is_ok(), "failed to load networks.yaml: {result:?}");
        let file = result.unwrap();
        assert!(!file.networks.is_empty());
        // The one-letter catch-all must stay last so specific names win.
        assert_eq!(file.networks.last().map(|n| n.name.as_str()), Some("X"));
    }
}
