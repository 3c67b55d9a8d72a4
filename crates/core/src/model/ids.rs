use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Catalog key for a route, e.g. `square-walk`.
///
/// Slugs are lowercase ASCII letters, digits and `-`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Creates a `RouteId` from a slug.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the slug is empty or contains characters
    /// outside `[a-z0-9-]`.
    pub fn new(slug: impl Into<String>) -> Result<Self, ParseIdError> {
        let slug = slug.into().trim().to_lowercase();
        let valid = !slug.is_empty()
            && slug
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
        if valid {
            Ok(Self(slug))
        } else {
            Err(ParseIdError {
                kind: "RouteId".to_string(),
            })
        }
    }

    /// Builds a `RouteId` from a known-good static slug.
    pub(crate) fn from_static(slug: &'static str) -> Self {
        Self(slug.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RouteId> for String {
    fn from(value: RouteId) -> Self {
        value.0
    }
}

/// Identifier of one active walkthrough session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for RouteId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteId::new(s)
    }
}

impl FromStr for SessionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId).map_err(|_| ParseIdError {
            kind: "SessionId".to_string(),
        })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_id_normalizes_case_and_whitespace() {
        let id = RouteId::new("  Square-Walk ").unwrap();
        assert_eq!(id.as_str(), "square-walk");
    }

    #[test]
    fn route_id_rejects_empty_and_spaces() {
        assert!(RouteId::new("").is_err());
        assert!(RouteId::new("two words").is_err());
        assert!("pune_gps".parse::<RouteId>().is_err());
    }

    #[test]
    fn route_id_display_roundtrip() {
        let original = RouteId::new("short-demo").unwrap();
        let parsed: RouteId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn route_id_deserializes_through_validation() {
        let id: RouteId = serde_json::from_str("\"pune-gps\"").unwrap();
        assert_eq!(id.as_str(), "pune-gps");
        assert!(serde_json::from_str::<RouteId>("\"no way\"").is_err());
    }

    #[test]
    fn session_id_from_str() {
        let id = SessionId::new_random();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }
}
