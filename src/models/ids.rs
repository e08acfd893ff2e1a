//! Strongly-typed ID wrappers for expenses and tags
//!
//! IDs are opaque strings: freshly created entities get a random UUID, but
//! documents imported from elsewhere may carry any string id, so parsing never
//! insists on UUID syntax.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing id string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form for terminal output
            pub fn short(&self) -> String {
                let head: String = self.0.chars().take(8).collect();
                format!("{}{}", $display_prefix, head)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Ok(Self(s.strip_prefix($display_prefix).unwrap_or(s).to_string()))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(TagId, "tag-");

impl ExpenseId {
    /// Check whether a (possibly shortened) id refers to this one
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        let candidate = candidate.strip_prefix("exp-").unwrap_or(candidate);
        !candidate.is_empty() && self.0.starts_with(candidate)
    }
}

impl TagId {
    /// Check whether a (possibly shortened) id refers to this one
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        let candidate = candidate.strip_prefix("tag-").unwrap_or(candidate);
        !candidate.is_empty() && self.0.starts_with(candidate)
    }
}
