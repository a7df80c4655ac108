use std::{fs, path::Path};

use anyhow::{Context, Result};
use telekinesis_core::RoomConfig;

/// Loads the room toggles, falling back to the defaults when no file is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<RoomConfig> {
    let Some(path) = path else {
        return Ok(RoomConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read room config at {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("invalid room config at {}", path.display()))?;
    log::debug!("loaded room config from {}: {config:?}", path.display());
    Ok(config)
}

fn parse_config(contents: &str) -> Result<RoomConfig> {
    toml::from_str(contents).context("failed to parse room config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_keep_their_defaults() {
        let config = parse_config("indicator_lines = true\n").expect("config parses");
        assert_eq!(
            config,
            RoomConfig {
                indicator_lines: true,
                ..RoomConfig::default()
            }
        );
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(
            parse_config("").expect("config parses"),
            RoomConfig::default()
        );
    }

    #[test]
    fn wrong_value_types_are_rejected() {
        assert!(parse_config("enabled = \"yes\"\n").is_err());
    }

    #[test]
    fn absent_path_uses_defaults() {
        assert_eq!(
            load_config(None).expect("defaults load"),
            RoomConfig::default()
        );
    }
}
