//! Manifest version codec.
//!
//! Addon manifests are `__manifest__.py` files holding a quoted
//! five-component version assignment. The codec extracts and rewrites
//! that single field; every other byte of the manifest passes through
//! untouched.

use crate::domain::AddonVersion;
use crate::error::{BumpError, Result};
use regex::Regex;

/// File name of an addon manifest, relative to the addon directory
pub const MANIFEST_FILE_NAME: &str = "__manifest__.py";

/// Structural pattern of the version assignment inside a manifest
const VERSION_PATTERN: &str = r"'version': '(\d+)\.(\d+)\.(\d+)\.(\d+)\.(\d+)'";

fn version_regex() -> Result<Regex> {
    Regex::new(VERSION_PATTERN)
        .map_err(|e| BumpError::version(format!("invalid version pattern: {}", e)))
}

/// Extract the version from manifest text.
///
/// Fails with a malformed-version error if the field is absent; the
/// pattern itself only matches numeric components.
pub fn parse_version(manifest: &str) -> Result<AddonVersion> {
    let re = version_regex()?;
    let captures = re
        .captures(manifest)
        .ok_or_else(|| BumpError::version("no 'version' field found in manifest".to_string()))?;

    let mut components = [0u32; 5];
    for (i, component) in components.iter_mut().enumerate() {
        let text = &captures[i + 1];
        *component = text
            .parse::<u32>()
            .map_err(|_| BumpError::version(format!("version component out of range: {}", text)))?;
    }

    Ok(AddonVersion::new(
        components[0],
        components[1],
        components[2],
        components[3],
        components[4],
    ))
}

/// Rewrite the version assignment in manifest text, leaving everything
/// else byte-identical. Fails if no version field is present.
pub fn substitute_version(manifest: &str, new_version: &AddonVersion) -> Result<String> {
    let re = version_regex()?;
    if !re.is_match(manifest) {
        return Err(BumpError::version(
            "no 'version' field found in manifest".to_string(),
        ));
    }

    let replacement = format!("'version': '{}'", new_version);
    Ok(re.replace(manifest, replacement.as_str()).into_owned())
}
