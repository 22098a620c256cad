use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::{PipelineError, Result};
use crate::pipeline::columns;

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "engagement-report.json";

/// Columns projected by the selector, in output order.
pub const SELECTED_COLUMNS: [&str; 10] = [
    columns::PAGE_NAME,
    columns::FOLLOWERS,
    columns::CREATED,
    columns::TYPE,
    columns::TOTAL_INTERACTIONS,
    columns::LIKES,
    columns::COMMENTS,
    columns::SHARES,
    columns::MESSAGE,
    columns::LINK_TEXT,
];

/// Cell contents that load as missing.
const NA_TOKENS: [&str; 13] = [
    "", "#N/A", "#NA", "N/A", "NA", "n/a", "NaN", "nan", "-NaN", "NULL", "null", "None", "<NA>",
];

/// `chrono` formats tried in order for naive timestamps.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

/// Run settings. Every field has a default, so a config file only needs the
/// keys it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// WHATWG encoding label of the input file.
    pub encoding: String,
    /// Single ASCII character; anything else fails at load.
    #[serde(deserialize_with = "ascii_delimiter")]
    pub delimiter: char,
    pub na_values: Vec<String>,
    pub selected_columns: Vec<String>,
    pub date_formats: Vec<String>,
    pub histogram_bins: usize,
    pub preview_rows: usize,
    pub show_chart: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("fb_sample_hwk-2 (1).csv"),
            output_path: PathBuf::from("processed_fb_data.csv"),
            encoding: "ISO-8859-1".to_owned(),
            delimiter: ',',
            na_values: NA_TOKENS.iter().map(|s| (*s).to_owned()).collect(),
            selected_columns: SELECTED_COLUMNS.iter().map(|s| (*s).to_owned()).collect(),
            date_formats: DATE_FORMATS.iter().map(|s| (*s).to_owned()).collect(),
            histogram_bins: 30,
            preview_rows: 5,
            show_chart: true,
        }
    }
}

impl ReportConfig {
    /// Load [`CONFIG_FILE`] from the working directory, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| PipelineError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// The delimiter as the single byte the CSV reader and writer expect.
    /// Files are checked on load; a non-ASCII delimiter set in code falls
    /// back to a comma.
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(b',')
    }
}

fn ascii_delimiter<'de, D>(deserializer: D) -> std::result::Result<char, D::Error>
where
    D: Deserializer<'de>,
{
    let c = char::deserialize(deserializer)?;
    if c.is_ascii() {
        Ok(c)
    } else {
        Err(serde::de::Error::custom(format!(
            "delimiter {c:?} is not an ASCII character"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.encoding, "ISO-8859-1");
        assert_eq!(config.selected_columns.len(), 10);
        assert_eq!(config.histogram_bins, 30);
        assert!(config.show_chart);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "output_path": "out.csv", "show_chart": false }"#).unwrap();

        let config = ReportConfig::load_from(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
        assert!(!config.show_chart);
        assert_eq!(config.input_path, PathBuf::from("fb_sample_hwk-2 (1).csv"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ReportConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config { .. }));
    }

    #[test]
    fn non_ascii_delimiter_in_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "delimiter": "é" }"#).unwrap();

        let err = ReportConfig::load_from(&path).unwrap_err();
        match err {
            PipelineError::Config { source, .. } => {
                assert!(source.to_string().contains("not an ASCII character"));
            }
            other => panic!("expected Config, got {other}"),
        }

        std::fs::write(&path, r#"{ "delimiter": ";" }"#).unwrap();
        let config = ReportConfig::load_from(&path).unwrap();
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn delimiter_byte_rejects_non_ascii() {
        let mut config = ReportConfig::default();
        config.delimiter = ';';
        assert_eq!(config.delimiter_byte(), b';');
        config.delimiter = 'é';
        assert_eq!(config.delimiter_byte(), b',');
    }
}
