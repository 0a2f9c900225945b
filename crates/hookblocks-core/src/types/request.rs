//! Classification of inbound requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What kind of request a render cycle is serving.
///
/// Only [`RequestKind::Content`] cycles install block hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// A front-end page render.
    Content,
    /// An administrative screen.
    Admin,
    /// A data-only request (REST, AJAX, feeds).
    Api,
}

impl RequestKind {
    /// Whether this request renders page content.
    pub fn renders_content(&self) -> bool {
        matches!(self, Self::Content)
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Admin => "admin",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "admin" => Ok(Self::Admin),
            "api" => Ok(Self::Api),
            other => Err(format!("unknown request kind '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_content_renders() {
        assert!(RequestKind::Content.renders_content());
        assert!(!RequestKind::Admin.renders_content());
        assert!(!RequestKind::Api.renders_content());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Admin".parse::<RequestKind>().unwrap(), RequestKind::Admin);
        assert!("cron".parse::<RequestKind>().is_err());
    }
}
