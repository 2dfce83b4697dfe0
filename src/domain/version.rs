use crate::domain::ChangeClass;
use crate::error::{BumpError, Result};
use std::fmt;

/// Five-component addon version: `platform_major.platform_minor.x.y.z`.
///
/// The leading `platform_major.platform_minor` pair is the platform
/// baseline the addon targets (e.g. `17.0`); it is never touched by a
/// bump. The trailing `x.y.z` triple is the addon's own counter.
///
/// The derived `Ord` compares fields in declaration order, which is
/// exactly the numeric component-wise ordering over the 5-tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AddonVersion {
    pub platform_major: u32,
    pub platform_minor: u32,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl AddonVersion {
    /// Create a new version from its five components
    pub fn new(platform_major: u32, platform_minor: u32, x: u32, y: u32, z: u32) -> Self {
        AddonVersion {
            platform_major,
            platform_minor,
            x,
            y,
            z,
        }
    }

    /// Parse a dotted version string (e.g. "17.0.2.4.1")
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.trim().split('.').collect();
        if parts.len() != 5 {
            return Err(BumpError::version(format!(
                "invalid version format: '{}' - expected MM.mm.X.Y.Z",
                text
            )));
        }

        let mut components = [0u32; 5];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part.parse::<u32>().map_err(|_| {
                BumpError::version(format!("non-numeric component '{}' in '{}'", part, text))
            })?;
        }

        Ok(AddonVersion::new(
            components[0],
            components[1],
            components[2],
            components[3],
            components[4],
        ))
    }

    /// Compute the next version for a change class.
    ///
    /// Breaking increments `x` and resets `y` and `z`; feature increments
    /// `y` and resets `z`; fix increments `z`. The platform pair is
    /// carried over unchanged.
    pub fn bump(&self, class: ChangeClass) -> Self {
        match class {
            ChangeClass::Breaking => AddonVersion {
                x: self.x + 1,
                y: 0,
                z: 0,
                ..*self
            },
            ChangeClass::Feature => AddonVersion {
                y: self.y + 1,
                z: 0,
                ..*self
            },
            ChangeClass::Fix => AddonVersion {
                z: self.z + 1,
                ..*self
            },
        }
    }
}

impl fmt::Display for AddonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}",
            self.platform_major, self.platform_minor, self.x, self.y, self.z
        )
    }
}
