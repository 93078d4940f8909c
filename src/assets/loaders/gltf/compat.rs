//! Version and extension gating, run once before any node is visited.

use super::document::{Document, KHR_LIGHTS_PUNCTUAL};
use crate::errors::{LoadError, Result};

pub const SUPPORTED_MAJOR: u32 = 2;
pub const SUPPORTED_MINOR: u32 = 0;

/// Extensions the loader implements.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[KHR_LIGHTS_PUNCTUAL];

/// Non-fatal findings of the gate. Each one is also logged at warning level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatWarning {
    NewerMinorVersion(String),
    UnsupportedExtensionUsed(String),
}

/// Parses `"<major>.<minor>"`.
pub fn parse_version(version: &str) -> Result<(u32, u32)> {
    let malformed = || LoadError::format(format!("malformed glTF version string '{version}'"));
    let (major, minor) = version.split_once('.').ok_or_else(malformed)?;
    let major = major.parse::<u32>().map_err(|_| malformed())?;
    let minor = minor.parse::<u32>().map_err(|_| malformed())?;
    Ok((major, minor))
}

/// Rejects documents this loader cannot handle and collects the warnings.
pub fn check(doc: &Document) -> Result<Vec<CompatWarning>> {
    let mut warnings = Vec::new();

    let (major, minor) = parse_version(&doc.asset.version)?;
    if major != SUPPORTED_MAJOR {
        return Err(LoadError::format(format!(
            "glTF version {} is not supported (expected {SUPPORTED_MAJOR}.x)",
            doc.asset.version
        )));
    }
    if minor > SUPPORTED_MINOR {
        log::warn!(
            "glTF version {} is newer than {SUPPORTED_MAJOR}.{SUPPORTED_MINOR}; unknown structures are ignored",
            doc.asset.version
        );
        warnings.push(CompatWarning::NewerMinorVersion(doc.asset.version.clone()));
    }

    // minVersion is a hard requirement, unlike version.
    if let Some(min_version) = &doc.asset.min_version {
        let (min_major, min_minor) = parse_version(min_version)?;
        if min_major != SUPPORTED_MAJOR || min_minor > SUPPORTED_MINOR {
            return Err(LoadError::format(format!(
                "glTF minVersion {min_version} exceeds supported {SUPPORTED_MAJOR}.{SUPPORTED_MINOR}"
            )));
        }
    }

    if let Some(ext) = doc
        .extensions_required
        .iter()
        .find(|ext| !SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    {
        return Err(LoadError::unsupported(format!("required extension {ext}")));
    }

    for ext in &doc.extensions_used {
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            log::warn!("glTF uses extension {ext}, which is not supported and will be ignored");
            warnings.push(CompatWarning::UnsupportedExtensionUsed(ext.clone()));
        }
    }

    if !doc.animations.is_empty() {
        return Err(LoadError::unsupported(format!(
            "animations ({} present)",
            doc.animations.len()
        )));
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        Document::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn parses_versions() {
        assert_eq!(parse_version("2.0").unwrap(), (2, 0));
        assert_eq!(parse_version("2.13").unwrap(), (2, 13));
        assert!(parse_version("2").is_err());
        assert!(parse_version("two.zero").is_err());
    }

    #[test]
    fn accepts_plain_2_0() {
        let warnings = check(&doc(r#"{"asset":{"version":"2.0"}}"#)).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn newer_minor_warns() {
        let warnings = check(&doc(r#"{"asset":{"version":"2.1"}}"#)).unwrap();
        assert_eq!(warnings, vec![CompatWarning::NewerMinorVersion("2.1".into())]);
    }

    #[test]
    fn newer_min_version_is_fatal() {
        let err = check(&doc(r#"{"asset":{"version":"2.1","minVersion":"2.1"}}"#)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn major_3_is_fatal() {
        let err = check(&doc(r#"{"asset":{"version":"3.0"}}"#)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn used_extension_only_warns() {
        let warnings = check(&doc(
            r#"{"asset":{"version":"2.0"},"extensionsUsed":["KHR_lights_punctual","KHR_materials_ior"]}"#,
        ))
        .unwrap();
        assert_eq!(
            warnings,
            vec![CompatWarning::UnsupportedExtensionUsed("KHR_materials_ior".into())]
        );
    }

    #[test]
    fn required_lights_extension_is_fine() {
        assert!(check(&doc(
            r#"{"asset":{"version":"2.0"},"extensionsRequired":["KHR_lights_punctual"]}"#
        ))
        .is_ok());
    }

    #[test]
    fn animations_are_fatal() {
        let err = check(&doc(
            r#"{"asset":{"version":"2.0"},"animations":[{"channels":[],"samplers":[]}]}"#,
        ))
        .unwrap_err();
        assert!(err.is_unsupported());
    }
}
