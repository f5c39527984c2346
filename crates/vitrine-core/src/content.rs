//! Page content shown by the showcase.

use serde::{Deserialize, Serialize};

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Slide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A page section reachable from the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Anchor identifier, matched against navigation links.
    pub id: String,
    /// Navigation label and heading.
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}
