use log::debug;
use serde_json::{Map, Value};

use minitoc::utils::BoxResult;
use minitoc::{config, TocConfig};

use crate::cli::types::TocArgs;

/// Build the configuration for a command.
///
/// The config file (if any) is merged over the defaults first, then the
/// command line flags on top, so flags win. Both go through the same lenient
/// merge as library options.
pub fn resolve_config(args: &TocArgs) -> BoxResult<TocConfig> {
    let base = match &args.config {
        Some(path) => config::load_config(path)?,
        None => TocConfig::default(),
    };

    let mut overrides = Map::new();
    if let Some(title) = &args.title {
        overrides.insert("title".to_string(), Value::from(title.as_str()));
    }
    if let Some(tag) = &args.title_tag {
        overrides.insert("titleTag".to_string(), Value::from(tag.as_str()));
    }
    if let Some(list_type) = args.list_type {
        overrides.insert("listType".to_string(), Value::from(list_type.tag()));
    }
    if let Some(headings) = &args.headings {
        let tags = headings.iter().map(|tag| Value::from(tag.trim())).collect();
        overrides.insert("headings".to_string(), Value::Array(tags));
    }

    let config = base.merge(&Value::Object(overrides));
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minitoc::ListType;

    #[test]
    fn test_flags_override_defaults() {
        let args = TocArgs {
            title: Some(String::new()),
            list_type: Some(ListType::Unordered),
            headings: Some(vec!["h2".to_string(), " h3".to_string()]),
            ..TocArgs::default()
        };
        let config = resolve_config(&args).unwrap();

        assert!(!config.has_title());
        assert_eq!(config.list_type, ListType::Unordered);
        assert_eq!(config.headings, vec!["h2", "h3"]);
        assert_eq!(config.title_tag, "h2");
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("minitoc-cli-config-{}.yml", std::process::id()));
        std::fs::write(&path, "title: From file\ntitleTag: h3\n").unwrap();

        let args = TocArgs {
            config: Some(path.clone()),
            title_tag: Some("p".to_string()),
            ..TocArgs::default()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.title, "From file");
        assert_eq!(config.title_tag, "p");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unreadable_config_file_is_an_error() {
        let args = TocArgs {
            config: Some(std::env::temp_dir().join("minitoc-missing-config.toml")),
            ..TocArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }
}
