//! Output resolution parsing and formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing a resolution string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Input is empty
    #[error("resolution string is empty")]
    Empty,

    /// Input is not in WIDTHxHEIGHT form
    #[error("resolution '{0}' is not in WIDTHxHEIGHT form")]
    InvalidFormat(String),

    /// A dimension failed to parse or is zero
    #[error("resolution '{0}' has an invalid {1} dimension")]
    InvalidDimension(String, &'static str),
}

/// An output resolution in pixels, written as `WIDTHxHEIGHT` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Create a resolution from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ResolutionError::Empty);
        }

        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| ResolutionError::InvalidFormat(s.to_string()))?;

        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| ResolutionError::InvalidDimension(s.to_string(), "width"))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| ResolutionError::InvalidDimension(s.to_string(), "height"))?;

        if width == 0 {
            return Err(ResolutionError::InvalidDimension(s.to_string(), "width"));
        }
        if height == 0 {
            return Err(ResolutionError::InvalidDimension(s.to_string(), "height"));
        }

        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<String> for Resolution {
    type Error = ResolutionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Resolution> for String {
    fn from(r: Resolution) -> Self {
        r.to_string()
    }
}
