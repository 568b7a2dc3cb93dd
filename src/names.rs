use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::Svg2SfdError;

/// PostScript weight names, indexed by `weight class / 100 - 1`.
pub const WEIGHT_NAMES: [&str; 9] = [
    "Thin",
    "Extra Light",
    "Light",
    "Regular",
    "Medium",
    "Semi Bold",
    "Bold",
    "Extra Bold",
    "Black",
];

pub const DEFAULT_NAME: &str = "Font";
pub const DEFAULT_FAMILY: &str = "Family";
pub const DEFAULT_WEIGHT: &str = "Regular";
pub const DEFAULT_WEIGHT_CLASS: u16 = 400;
pub const DEFAULT_VERSION: &str = "1.0.1";

/// User-supplied font metadata. Any field left unset (or empty) falls back
/// to a default when the font is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    pub name: Option<String>,
    pub family: Option<String>,
    pub copyright: Option<String>,
    /// A weight name, or a numeric weight class such as `"700"`
    pub weight: Option<String>,
    pub version: Option<String>,
}

/// Metadata with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    pub name: String,
    pub family: String,
    pub copyright: String,
    pub weight: String,
    pub weight_class: u16,
    pub version: String,
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FontOptions {
    /// Read options from a JSON object such as `{"name": "Sprite", "weight": "700"}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Svg2SfdError> {
        let buffered = std::io::BufReader::new(std::fs::File::open(path)?);
        Ok(serde_json::from_reader(buffered)?)
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: FontOptions) -> FontOptions {
        FontOptions {
            name: overrides.name.or(self.name),
            family: overrides.family.or(self.family),
            copyright: overrides.copyright.or(self.copyright),
            weight: overrides.weight.or(self.weight),
            version: overrides.version.or(self.version),
        }
    }

    pub fn resolve(&self, context: &BuildContext) -> Result<ResolvedNames, Svg2SfdError> {
        let (weight, weight_class) = resolve_weight(given(&self.weight))?;
        Ok(ResolvedNames {
            name: given(&self.name).unwrap_or(DEFAULT_NAME).to_string(),
            family: given(&self.family).unwrap_or(DEFAULT_FAMILY).to_string(),
            copyright: given(&self.copyright)
                .map(|c| c.to_string())
                .unwrap_or_else(|| context.default_copyright()),
            weight,
            weight_class,
            version: given(&self.version).unwrap_or(DEFAULT_VERSION).to_string(),
        })
    }
}

/// Map a weight option onto a PostScript weight name and an OS/2 weight class.
pub fn resolve_weight(weight: Option<&str>) -> Result<(String, u16), Svg2SfdError> {
    let Some(weight) = weight else {
        return Ok((DEFAULT_WEIGHT.to_string(), DEFAULT_WEIGHT_CLASS));
    };
    if !weight.chars().all(|c| c.is_ascii_digit()) {
        return Ok((weight.to_string(), DEFAULT_WEIGHT_CLASS));
    }
    let bad_weight = || Svg2SfdError::BadWeight {
        weight: weight.to_string(),
    };
    let class = weight.parse::<u16>().map_err(|_| bad_weight())?;
    let name = (class / 100)
        .checked_sub(1)
        .and_then(|ix| WEIGHT_NAMES.get(ix as usize))
        .ok_or_else(bad_weight)?;
    Ok((name.to_string(), class))
}

/// The ambient facts a conversion depends on: the clock and who is running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub now: DateTime<Utc>,
    /// Full name of the current user, used in the default copyright notice
    pub user_name: String,
}

impl BuildContext {
    pub fn new(now: DateTime<Utc>, user_name: impl Into<String>) -> Self {
        BuildContext {
            now,
            user_name: user_name.into(),
        }
    }

    /// Capture the current time and user from the process environment.
    pub fn from_environment() -> Self {
        let user_name = ["USER", "USERNAME"]
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .unwrap_or_default();
        BuildContext::new(Utc::now(), user_name)
    }

    pub fn default_copyright(&self) -> String {
        format!("Copyright (c) {} {}", self.now.year(), self.user_name)
    }
}
