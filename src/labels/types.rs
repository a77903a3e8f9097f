//! Label values as they appear in configuration and label files

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reserved integer marking an entry that has not been labeled yet.
///
/// Label files written by this tool store it verbatim, and it must never be
/// configured as a real label token.
pub const UNLABELED: i64 = -100;

/// A user-defined label, either a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelToken {
    Int(i64),
    Text(String),
}

impl LabelToken {
    /// Whether this token collides with the [`UNLABELED`] sentinel.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Int(UNLABELED))
    }
}

impl fmt::Display for LabelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for LabelToken {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LabelToken {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for LabelToken {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// The label currently held by a dataset entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LabelValue {
    #[default]
    Unlabeled,
    Labeled(LabelToken),
}

impl LabelValue {
    #[must_use]
    pub const fn is_unlabeled(&self) -> bool {
        matches!(self, Self::Unlabeled)
    }

    #[must_use]
    pub const fn token(&self) -> Option<&LabelToken> {
        match self {
            Self::Unlabeled => None,
            Self::Labeled(token) => Some(token),
        }
    }
}

impl From<LabelToken> for LabelValue {
    fn from(token: LabelToken) -> Self {
        if token.is_reserved() {
            Self::Unlabeled
        } else {
            Self::Labeled(token)
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlabeled => write!(f, "{UNLABELED}"),
            Self::Labeled(token) => token.fmt(f),
        }
    }
}

impl Serialize for LabelValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unlabeled => serializer.serialize_i64(UNLABELED),
            Self::Labeled(token) => token.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LabelValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` and the sentinel both mean "not labeled yet"
        Ok(Option::<LabelToken>::deserialize(deserializer)?.map_or(Self::Unlabeled, Self::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_reserved() {
        assert!(LabelToken::Int(UNLABELED).is_reserved());
        assert!(!LabelToken::Int(3).is_reserved());
        assert!(!LabelToken::from("-100").is_reserved());
    }

    #[test]
    fn test_value_from_sentinel_token() {
        assert_eq!(LabelValue::from(LabelToken::Int(-100)), LabelValue::Unlabeled);
        assert_eq!(
            LabelValue::from(LabelToken::from("good")),
            LabelValue::Labeled(LabelToken::from("good"))
        );
    }

    #[test]
    fn test_value_json_forms() {
        let unlabeled = serde_json::to_string(&LabelValue::Unlabeled).unwrap();
        assert_eq!(unlabeled, "-100");

        let text: LabelValue = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(text.token(), Some(&LabelToken::from("bad")));

        let int: LabelValue = serde_json::from_str("2").unwrap();
        assert_eq!(int.token(), Some(&LabelToken::Int(2)));

        let null: LabelValue = serde_json::from_str("null").unwrap();
        assert!(null.is_unlabeled());
    }

    #[test]
    fn test_value_rejects_other_json_types() {
        assert!(serde_json::from_str::<LabelValue>("1.5").is_err());
        assert!(serde_json::from_str::<LabelValue>("true").is_err());
        assert!(serde_json::from_str::<LabelValue>("[1]").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(LabelValue::Unlabeled.to_string(), "-100");
        assert_eq!(LabelValue::Labeled(LabelToken::Int(4)).to_string(), "4");
        assert_eq!(LabelValue::Labeled("ok".into()).to_string(), "ok");
    }
}
