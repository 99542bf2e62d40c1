//! Resource identity derived from reference naming conventions.
//!
//! A reference is expected to look like `.../<group>/<version>.<Kind>`:
//! the last `/`-separated segment holds `<version>.<Kind>` and the one
//! before it names the group.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("reference {0:?} has no group segment")]
    MissingGroup(String),

    #[error("reference {0:?} has no version")]
    MissingVersion(String),

    #[error("reference {0:?} has no kind")]
    MissingKind(String),
}

/// The group/version and kind of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    group_version: String,
    kind: String,
}

impl ResourceId {
    /// Parse a reference such as `k8s.io/api/core/v1.Pod`.
    ///
    /// Yields `group_version = "core/v1"` and `kind = "Pod"`. Only the
    /// first two dot-separated tokens of the last segment are used.
    pub fn parse(reference: &str) -> Result<Self, IdentityError> {
        let mut segments = reference.rsplit('/');
        let last = segments.next().unwrap_or_default();
        let group = match segments.next() {
            Some(group) if !group.is_empty() => group,
            _ => return Err(IdentityError::MissingGroup(reference.to_string())),
        };

        let Some((version, rest)) = last.split_once('.') else {
            return Err(IdentityError::MissingVersion(reference.to_string()));
        };
        let kind = rest.split('.').next().unwrap_or_default();
        if version.is_empty() {
            return Err(IdentityError::MissingVersion(reference.to_string()));
        }
        if kind.is_empty() {
            return Err(IdentityError::MissingKind(reference.to_string()));
        }

        Ok(Self {
            group_version: format!("{}/{}", group, version),
            kind: kind.to_string(),
        })
    }

    /// `<group>/<version>`, the value of an `apiVersion` field.
    pub fn group_version(&self) -> &str {
        &self.group_version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// `<group>_<version>_<kind>`, used as document title and file stem.
    pub fn identifier(&self) -> String {
        format!("{}_{}", self.group_version.replace('/', "_"), self.kind)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.group_version, self.kind)
    }
}
