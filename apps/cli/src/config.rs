//! Conversion options from a JSON file and command-line overrides

use std::fs;
use std::path::Path;

use anyhow::Context;
use pathkey_identifier::{ConversionOptions, StaticMemberConversion};

/// Load options from `path`, or the defaults when no file is given.
///
/// Fields missing from the file keep their default values.
pub fn load_options(path: Option<&Path>) -> anyhow::Result<ConversionOptions> {
    let Some(path) = path else {
        return Ok(ConversionOptions::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let options = serde_json::from_str(&raw)
        .with_context(|| format!("invalid conversion options in {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?options, "loaded conversion options");
    Ok(options)
}

pub fn apply_overrides(
    mut options: ConversionOptions,
    separator: Option<String>,
    static_member_conversion: Option<StaticMemberConversion>,
) -> ConversionOptions {
    if let Some(separator) = separator {
        options = options.with_separator(separator);
    }
    if let Some(conversion) = static_member_conversion {
        options = options.with_static_member_conversion(conversion);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let options: ConversionOptions =
            serde_json::from_str(r#"{"staticMemberConversion": "parentTypeFullName"}"#).unwrap();
        assert_eq!(options.separator, ".");
        assert_eq!(
            options.static_member_conversion,
            StaticMemberConversion::ParentTypeFullName
        );
    }

    #[test]
    fn flags_override_file() {
        let file = ConversionOptions::default().with_separator("/");
        let options = apply_overrides(file, Some("_".to_string()), None);
        assert_eq!(options.separator, "_");
        assert_eq!(
            options.static_member_conversion,
            StaticMemberConversion::MemberNameOnly
        );
    }
}
