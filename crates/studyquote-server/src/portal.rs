//! Portal selection.
//!
//! The marketplace ships three portals from one deployment. Which one this
//! process serves is fixed at startup by configuration.

use serde::{Deserialize, Serialize};

/// The marketplace portal served by this process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Portal {
    /// Student marketplace (default).
    #[default]
    Student,
    /// Expert / tutor portal.
    Expert,
    /// Admin console.
    Admin,
}

impl Portal {
    /// Parses a string into a `Portal`, case-insensitively.
    ///
    /// `tutor` is accepted as an alias for [`Portal::Expert`].
    fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Some(Self::Student),
            "expert" | "tutor" => Some(Self::Expert),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Config-file spelling of this portal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Expert => "expert",
            Self::Admin => "admin",
        }
    }

    /// Application type identifier used by the front ends.
    #[must_use]
    pub const fn app_type(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Expert => "EXPERT",
            Self::Admin => "ADMIN",
        }
    }

    /// Theme colour class for the portal chrome.
    #[must_use]
    pub const fn theme_color(self) -> &'static str {
        match self {
            Self::Student => "bg-blue-600",
            Self::Expert => "bg-indigo-600",
            Self::Admin => "bg-slate-800",
        }
    }

    /// Human-readable portal name.
    #[must_use]
    pub const fn portal_name(self) -> &'static str {
        match self {
            Self::Student => "Student Marketplace",
            Self::Expert => "Tutor Portal",
            Self::Admin => "Admin Console",
        }
    }

    /// Presentation details for `GET /portal`.
    #[must_use]
    pub const fn info(self) -> PortalInfo {
        PortalInfo {
            app_type: self.app_type(),
            theme_color: self.theme_color(),
            portal_name: self.portal_name(),
        }
    }
}

impl std::fmt::Display for Portal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Portal {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_str_case_insensitive(s).ok_or_else(|| {
            format!("invalid portal '{s}': expected one of 'student', 'expert', 'admin'")
        })
    }
}

impl<'de> Deserialize<'de> for Portal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Portal {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Portal presentation details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalInfo {
    /// Application type (`STUDENT`, `EXPERT`, `ADMIN`).
    #[serde(rename = "type")]
    pub app_type: &'static str,
    /// Theme colour class.
    pub theme_color: &'static str,
    /// Display name.
    pub portal_name: &'static str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_parse_case_insensitive() {
        assert_eq!("Student".parse::<Portal>().unwrap(), Portal::Student);
        assert_eq!("ADMIN".parse::<Portal>().unwrap(), Portal::Admin);
        assert_eq!("tutor".parse::<Portal>().unwrap(), Portal::Expert);
        assert_eq!(" expert ".parse::<Portal>().unwrap(), Portal::Expert);
    }

    #[test]
    fn test_invalid_portal_error() {
        let err = "mentor".parse::<Portal>().unwrap_err();
        assert!(err.contains("invalid portal"));
        assert!(err.contains("mentor"));
    }

    #[test]
    fn test_portal_serialization() {
        assert_eq!(serde_json::to_string(&Portal::Expert).unwrap(), "\"expert\"");
        let portal: Portal = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(portal, Portal::Admin);
    }

    #[test]
    fn test_portal_info() {
        let json = serde_json::to_value(Portal::Admin.info()).unwrap();
        assert_eq!(json["type"], "ADMIN");
        assert_eq!(json["themeColor"], "bg-slate-800");
        assert_eq!(json["portalName"], "Admin Console");

        assert_eq!(Portal::Student.info().portal_name, "Student Marketplace");
        assert_eq!(Portal::Expert.info().theme_color, "bg-indigo-600");
    }
}
