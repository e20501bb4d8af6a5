//! Hierarchical content names

use crate::error::PacketError;
use std::fmt;
use std::str::FromStr;

/// A hierarchical content name such as `/video/seg=3`
///
/// Names are compared component-wise. The URI rendering returned by
/// [`Name::to_uri`] is the normalized key used wherever a name identifies
/// per-request state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name {
    components: Vec<String>,
}

impl Name {
    /// The root name `/`
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a name from its URI form
    ///
    /// A leading `/` is required. A single trailing `/` is tolerated; any
    /// other empty component is rejected.
    pub fn parse(uri: &str) -> Result<Self, PacketError> {
        let rest = uri.strip_prefix('/').ok_or_else(|| PacketError::InvalidName {
            uri: uri.to_string(),
            reason: "name must start with '/'".to_string(),
        })?;

        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let mut components = Vec::new();
        for component in rest.split('/') {
            if component.is_empty() {
                return Err(PacketError::InvalidName {
                    uri: uri.to_string(),
                    reason: "empty name component".to_string(),
                });
            }
            components.push(component.to_string());
        }

        Ok(Self { components })
    }

    /// Append a component
    pub fn append(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether this is the root name
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in order
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The first `n` components (the whole name if it is shorter)
    pub fn prefix(&self, n: usize) -> Name {
        Self {
            components: self.components.iter().take(n).cloned().collect(),
        }
    }

    /// Whether this name is a prefix of `other`
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.components.len() <= other.components.len()
            && self
                .components
                .iter()
                .zip(other.components.iter())
                .all(|(a, b)| a == b)
    }

    /// URI rendering, e.g. `/a/b`
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }
        self.components.iter().map(|c| format!("/{}", c)).collect()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl FromStr for Name {
    type Err = PacketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
