use serde::{Deserialize, Serialize};
use std::fmt;

/// A CSS hex color literal (`#rgb`, `#rrggbb` or `#rrggbbaa`).
///
/// The authored spelling (including letter case) is kept so exported code reads exactly like the
/// authored configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse and validate a hex color literal.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let Some(digits) = s.strip_prefix('#') else {
            return Err(format!("hex color \"{s}\" must start with '#'"));
        };
        if !matches!(digits.len(), 3 | 6 | 8) {
            return Err(format!(
                "hex color \"{s}\" must be #RGB, #RRGGBB or #RRGGBBAA"
            ));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("hex color \"{s}\" contains a non-hex digit"));
        }
        Ok(Self(s.to_owned()))
    }

    /// Compile-time literal from the built-in tables.
    pub(crate) fn literal(s: &'static str) -> Self {
        debug_assert!(Self::parse(s).is_ok(), "bad color literal {s}");
        Self(s.to_owned())
    }

    /// Uniformly random opaque `#rrggbb` color.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self(format!("#{:06x}", rng.u32(..0x0100_0000)))
    }

    /// Borrow the literal.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
