use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for hostel record management.
///
/// This struct holds the settings that control record defaulting and
/// display formatting. It is stored as versioned TOML so the format can
/// evolve without breaking existing files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether newly created students default their admission date to
    /// the current day.
    pub default_admission_to_today: bool,

    /// The number of digits room numbers are padded to when formatted
    /// for display, e.g. `3` renders room 7 as `007`.
    digits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_admission_to_today: true,
            digits: default_digits(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML
    /// content is invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to
    /// TOML or if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the number of digits for padding room numbers.
    #[must_use]
    pub const fn digits(&self) -> usize {
        self.digits
    }

    /// Formats a room number with the configured digit padding.
    #[must_use]
    pub fn format_room_number(&self, number: u32) -> String {
        format!("{number:0width$}", width = self.digits)
    }
}

const fn default_digits() -> usize {
    3
}

const fn default_admission_to_today() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_admission_to_today")]
        default_admission_to_today: bool,

        /// The number of digits room numbers are padded to for display.
        #[serde(default = "default_digits")]
        digits: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                default_admission_to_today,
                digits,
            } => Self {
                default_admission_to_today,
                digits,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            default_admission_to_today: config.default_admission_to_today,
            digits: config.digits,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndefault_admission_to_today = false\ndigits = 4\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert!(!config.default_admission_to_today);
        assert_eq!(config.digits(), 4);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndigits = \"three\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising a version-only file returns the
        // default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_load_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.default_admission_to_today = false;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn formats_room_numbers() {
        let config = Config::default();
        assert_eq!(config.format_room_number(7), "007");
        assert_eq!(config.format_room_number(1234), "1234");
    }
}
