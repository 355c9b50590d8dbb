//! Asset (uploaded image) file name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AssetName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetNameError {
    /// The input string is empty.
    #[error("asset name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("asset name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a path separator or NUL byte.
    #[error("asset name must be a bare file name")]
    NotAFileName,
    /// The input is `.` or `..`.
    #[error("asset name cannot be a relative directory reference")]
    DirectoryReference,
}

/// The name of a stored asset, relative to the asset directory.
///
/// Products reference their image by this name only; the bytes live in the
/// asset store.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - No `/`, `\` or NUL
/// - Not `.` or `..`
///
/// ## Examples
///
/// ```
/// use shop_catalog_core::AssetName;
///
/// assert!(AssetName::parse("1718000000000-3fa2c1d9.png").is_ok());
///
/// assert!(AssetName::parse("").is_err());
/// assert!(AssetName::parse("../shop.db").is_err());
/// assert!(AssetName::parse("uploads/a.png").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    /// Maximum length of an asset name (common file system limit).
    pub const MAX_LENGTH: usize = 255;

    /// Parse an `AssetName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 255 characters
    /// - Contains a path separator or NUL byte
    /// - Is `.` or `..`
    pub fn parse(s: &str) -> Result<Self, AssetNameError> {
        if s.is_empty() {
            return Err(AssetNameError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(AssetNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.contains(['/', '\\', '\0']) {
            return Err(AssetNameError::NotAFileName);
        }

        if s == "." || s == ".." {
            return Err(AssetNameError::DirectoryReference);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the asset name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AssetName {
    type Err = AssetNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssetName {
    type Error = AssetNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetName> for String {
    fn from(name: AssetName) -> Self {
        name.0
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        assert!(AssetName::parse("a.png").is_ok());
        assert!(AssetName::parse("1718000000000-3fa2c1d9.jpeg").is_ok());
        assert!(AssetName::parse("no-extension").is_ok());
        assert!(AssetName::parse(".hidden").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(AssetName::parse(""), Err(AssetNameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(256);
        assert!(matches!(
            AssetName::parse(&long),
            Err(AssetNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_paths() {
        assert_eq!(
            AssetName::parse("../etc/passwd"),
            Err(AssetNameError::NotAFileName)
        );
        assert_eq!(
            AssetName::parse("dir\\file.png"),
            Err(AssetNameError::NotAFileName)
        );
        assert_eq!(
            AssetName::parse("a\0b"),
            Err(AssetNameError::NotAFileName)
        );
    }

    #[test]
    fn test_parse_rejects_directory_references() {
        assert_eq!(AssetName::parse("."), Err(AssetNameError::DirectoryReference));
        assert_eq!(AssetName::parse(".."), Err(AssetNameError::DirectoryReference));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: AssetName = serde_json::from_str("\"a.png\"").unwrap();
        assert_eq!(ok.as_str(), "a.png");
        assert!(serde_json::from_str::<AssetName>("\"../a.png\"").is_err());
    }
}
