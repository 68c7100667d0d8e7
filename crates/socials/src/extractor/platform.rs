use std::fmt;

use super::error::ExtractorError;

/// Canonical platforms the dispatcher can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    YouTube,
    TikTok,
    Facebook,
    Instagram,
}

impl Platform {
    /// Resolve an inbound platform identifier against the alias table.
    ///
    /// Matching is case-sensitive; only the listed spellings are accepted.
    pub fn from_alias(alias: &str) -> Result<Self, ExtractorError> {
        match alias {
            "YouTube" | "youtube" | "yt" => Ok(Self::YouTube),
            "TikTok" | "tiktok" | "tt" => Ok(Self::TikTok),
            "Facebook" | "facebook" | "fb" => Ok(Self::Facebook),
            "Instagram" | "instagram" | "ig" => Ok(Self::Instagram),
            other => Err(ExtractorError::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_aliases_resolve() {
        for alias in ["YouTube", "youtube", "yt"] {
            assert_eq!(Platform::from_alias(alias).unwrap(), Platform::YouTube);
        }
        for alias in ["TikTok", "tiktok", "tt"] {
            assert_eq!(Platform::from_alias(alias).unwrap(), Platform::TikTok);
        }
        for alias in ["Facebook", "facebook", "fb"] {
            assert_eq!(Platform::from_alias(alias).unwrap(), Platform::Facebook);
        }
        for alias in ["Instagram", "instagram", "ig"] {
            assert_eq!(Platform::from_alias(alias).unwrap(), Platform::Instagram);
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        for alias in ["YT", "Youtube", "YOUTUBE", "Tt", "FB", "iG", "twitter", ""] {
            assert!(matches!(
                Platform::from_alias(alias),
                Err(ExtractorError::UnsupportedPlatform(_))
            ));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::TikTok.to_string(), "TikTok");
        assert_eq!(Platform::YouTube.as_str(), "YouTube");
    }
}
