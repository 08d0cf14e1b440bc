use std::path::Path;

use htmlfaker_core::{PartialConfiguration, PartialLeadOptions};

use crate::CliError;

/// Read overrides from a `.json` file, or TOML for any other extension.
pub fn load_overrides(path: &Path) -> Result<PartialConfiguration, CliError> {
    let content = std::fs::read_to_string(path)?;
    parse_overrides(&content, path)
}

fn parse_overrides(content: &str, path: &Path) -> Result<PartialConfiguration, CliError> {
    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(toml::from_str(content)?)
    }
}

/// Command-line flags that take precedence over the configuration file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlagOverrides {
    pub paragraphs: Option<u32>,
    pub lead: Option<u32>,
}

impl FlagOverrides {
    pub fn apply(self, overrides: &mut PartialConfiguration) {
        let flags = PartialConfiguration {
            paragraphs: self.paragraphs,
            lead: self.lead.map(|paragraphs| PartialLeadOptions {
                paragraphs: Some(paragraphs),
                ..PartialLeadOptions::default()
            }),
            ..PartialConfiguration::default()
        };
        overrides.merge(&flags);
    }
}

/// Effective defaults as a TOML document.
pub fn defaults_toml() -> Result<String, CliError> {
    let defaults = htmlfaker_core::Configuration::default().to_partial();
    Ok(toml::to_string_pretty(&defaults)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_and_json_files_parse_alike() {
        let from_toml = parse_overrides(
            "paragraphs = 2\n[lead]\nparagraphs = 1\n",
            Path::new("fragment.toml"),
        )
        .expect("toml");
        let from_json = parse_overrides(
            r#"{"paragraphs": 2, "lead": {"paragraphs": 1}}"#,
            Path::new("fragment.JSON"),
        )
        .expect("json");
        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.paragraphs, Some(2));
    }

    #[test]
    fn flags_override_file_values() {
        let mut overrides = PartialConfiguration {
            paragraphs: Some(9),
            lead: Some(PartialLeadOptions {
                class: Some("intro".to_string()),
                ..PartialLeadOptions::default()
            }),
            ..PartialConfiguration::default()
        };
        FlagOverrides {
            paragraphs: Some(1),
            lead: Some(2),
        }
        .apply(&mut overrides);

        assert_eq!(overrides.paragraphs, Some(1));
        let lead = overrides.lead.expect("lead options");
        assert_eq!(lead.paragraphs, Some(2));
        assert_eq!(lead.class.as_deref(), Some("intro"));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let encoded = defaults_toml().expect("encode");
        let decoded: PartialConfiguration = toml::from_str(&encoded).expect("decode");
        assert_eq!(
            htmlfaker_core::Configuration::resolve(&decoded),
            Ok(htmlfaker_core::Configuration::default())
        );
    }
}
