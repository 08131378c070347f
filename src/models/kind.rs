//! Resource kinds exposed by the catalog backend

use serde::{Deserialize, Serialize};

/// The three browsable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Books,
    Films,
    Magazines,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Books,
        ResourceKind::Films,
        ResourceKind::Magazines,
    ];

    /// Path segment used by the backend routes (`/resources/{slug}`, ...).
    pub fn as_slug(&self) -> &'static str {
        match self {
            ResourceKind::Books => "books",
            ResourceKind::Films => "films",
            ResourceKind::Magazines => "magazines",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Books => "Books",
            ResourceKind::Films => "Films",
            ResourceKind::Magazines => "Magazines",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "books" => Ok(ResourceKind::Books),
            "films" => Ok(ResourceKind::Films),
            "magazines" => Ok(ResourceKind::Magazines),
            _ => Err(format!("Invalid resource kind: {}", s)),
        }
    }
}
