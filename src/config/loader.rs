use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::config::types::{ListType, TocConfig};
use crate::config::validation;
use crate::utils::error::{BoxResult, TocError};
use crate::utils::fs;

impl TocConfig {
    /// Build a configuration from defaults overlaid with `options`
    pub fn from_options(options: &Value) -> Self {
        Self::default().merge(options)
    }

    /// Overlay caller options on this configuration and return the result.
    ///
    /// Only recognized keys with the right type and a valid value take
    /// effect; everything else is skipped and logged at debug level. A
    /// non-object `options` leaves the configuration as it is.
    pub fn merge(&self, options: &Value) -> Self {
        let mut merged = self.clone();

        let map = match options.as_object() {
            Some(map) => map,
            None => {
                if !options.is_null() {
                    debug!("Ignoring non-object table of contents options: {}", options);
                }
                return merged;
            }
        };

        for (key, value) in map {
            match key.as_str() {
                "headings" => match parse_headings(value) {
                    Some(headings) => merged.headings = headings,
                    None => debug!("Ignoring invalid 'headings' option: {}", value),
                },
                "title" => match value.as_str() {
                    Some(title) => merged.title = title.to_string(),
                    None => debug!("Ignoring non-string 'title' option: {}", value),
                },
                "titleTag" | "title_tag" => match value.as_str() {
                    Some(tag) if validation::is_valid_tag_name(tag) => {
                        merged.title_tag = tag.to_ascii_lowercase()
                    }
                    _ => debug!("Ignoring invalid 'titleTag' option: {}", value),
                },
                "listType" | "list_type" => {
                    match value.as_str().map(str::parse::<ListType>) {
                        Some(Ok(list_type)) => merged.list_type = list_type,
                        _ => debug!("Ignoring invalid 'listType' option: {}", value),
                    }
                }
                other => debug!("Ignoring unrecognized option '{}'", other),
            }
        }

        merged
    }
}

fn parse_headings(value: &Value) -> Option<Vec<String>> {
    let headings = value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_ascii_lowercase))
        .collect::<Option<Vec<String>>>()?;

    validation::validate_headings(&headings).ok()?;
    Some(headings)
}

/// Load table of contents options from a YAML, TOML or JSON file.
///
/// The file is parsed into a generic value and merged over the defaults, so
/// its fields get the same leniency as programmatic options. A file that
/// cannot be read or parsed is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> BoxResult<TocConfig> {
    let options = load_options(path.as_ref())?;
    let config = TocConfig::from_options(&options);
    debug!("Configuration loaded from {}: {:?}", path.as_ref().display(), config);
    Ok(config)
}

/// Read a configuration file into a generic value
pub fn load_options(path: &Path) -> BoxResult<Value> {
    if !path.exists() {
        return Err(TocError::Config(format!(
            "Configuration file not found: {}", path.display()
        )).into());
    }

    let content = fs::read_file(path).map_err(|e| TocError::Config(format!(
        "Failed to read configuration file {}: {}", path.display(), e
    )))?;

    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    // Assume YAML if no extension
    let value = match ext.as_str() {
        "yml" | "yaml" | "" => parse_yaml_options(&content, path)?,
        "toml" => parse_toml_options(&content, path)?,
        "json" => parse_json_options(&content, path)?,
        other => {
            return Err(TocError::Config(format!(
                "Unsupported configuration file format: {}", other
            )).into());
        }
    };

    Ok(value)
}

/// Parse YAML options
fn parse_yaml_options(content: &str, path: &Path) -> BoxResult<Value> {
    // An empty YAML document is null, which merges as "no options"
    serde_yaml::from_str::<Value>(content)
        .map_err(|e| TocError::Config(format!(
            "Failed to parse YAML configuration ({}): {}", path.display(), e
        )).into())
}

/// Parse TOML options
fn parse_toml_options(content: &str, path: &Path) -> BoxResult<Value> {
    toml::from_str::<Value>(content)
        .map_err(|e| TocError::Config(format!(
            "Failed to parse TOML configuration ({}): {}", path.display(), e
        )).into())
}

/// Parse JSON options
fn parse_json_options(content: &str, path: &Path) -> BoxResult<Value> {
    serde_json::from_str::<Value>(content)
        .map_err(|e| TocError::Config(format!(
            "Failed to parse JSON configuration ({}): {}", path.display(), e
        )).into())
}
