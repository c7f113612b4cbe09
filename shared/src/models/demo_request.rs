//! Demo Request Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Demo request lifecycle status
///
/// Persisted as the upper-case string returned by [`DemoRequestStatus::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemoRequestStatus {
    Pending,
    Contacted,
    Scheduled,
    Completed,
    Cancelled,
}

impl DemoRequestStatus {
    pub const ALL: [DemoRequestStatus; 5] = [
        Self::Pending,
        Self::Contacted,
        Self::Scheduled,
        Self::Completed,
        Self::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Contacted => "CONTACTED",
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for DemoRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a stored status string that is not a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown demo request status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DemoRequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Demo request entity
///
/// `status` is kept as the raw stored string so rows written under older
/// enum definitions can still be loaded and remapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct DemoRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub restaurant_name: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl DemoRequest {
    /// Parsed status
    pub fn status(&self) -> Result<DemoRequestStatus, UnknownStatus> {
        self.status.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip_str() {
        for status in DemoRequestStatus::ALL {
            assert_eq!(status.as_str().parse::<DemoRequestStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_legacy_values() {
        assert_eq!(
            "pending".parse::<DemoRequestStatus>(),
            Err(UnknownStatus("pending".into()))
        );
        assert!("DONE".parse::<DemoRequestStatus>().is_err());
    }

    #[test]
    fn test_status_serde_matches_as_str() {
        let json = serde_json::to_string(&DemoRequestStatus::Scheduled).unwrap();
        assert_eq!(json, "\"SCHEDULED\"");
    }
}
