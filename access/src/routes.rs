//! Static mapping of path prefixes to the role allowed to view them.
//!
//! DESIGN
//! ======
//! The edge gate only needs `is_protected`; layout gates need `fallback_for`.
//! Keeping both in one validated table is what rules out redirect loops: a
//! fallback always lies in its own role's area, and areas never overlap, so
//! following a fallback can never land on a layout that rejects the same user.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use serde::{Deserialize, Serialize};

use crate::error::RouteTableError;
use crate::role::Role;

pub const DEFAULT_PUBLIC_ROOT: &str = "/";
pub const DEFAULT_PROTECTED_PREFIX: &str = "/dashboard";

/// Paths a role may view, plus where a user of that role is sent when they
/// land somewhere they do not belong.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleArea {
    pub role: Role,
    pub prefix: String,
    pub fallback: String,
}

impl RoleArea {
    pub fn new(role: Role, prefix: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self { role, prefix: prefix.into(), fallback: fallback.into() }
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        path_has_prefix(path, &self.prefix)
    }
}

/// Validated route table shared by the edge gate and every layout gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    public_root: String,
    protected: Vec<String>,
    areas: Vec<RoleArea>,
}

impl RouteTable {
    /// Build a table, rejecting any configuration that breaks the
    /// one-owner-per-path or no-redirect-loop rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteTableError`] found.
    pub fn new(
        public_root: impl Into<String>,
        protected: Vec<String>,
        areas: Vec<RoleArea>,
    ) -> Result<Self, RouteTableError> {
        let public_root = public_root.into();
        ensure_absolute(&public_root)?;
        for prefix in &protected {
            ensure_absolute(prefix)?;
        }

        for role in Role::ALL {
            match areas.iter().filter(|a| a.role == role).count() {
                0 => return Err(RouteTableError::MissingRole(role)),
                1 => {}
                _ => return Err(RouteTableError::DuplicateRole(role)),
            }
        }

        for (i, area) in areas.iter().enumerate() {
            ensure_absolute(&area.prefix)?;
            ensure_absolute(&area.fallback)?;

            if !area.contains(&area.fallback) {
                return Err(RouteTableError::FallbackOutsideArea {
                    role: area.role,
                    fallback: area.fallback.clone(),
                });
            }
            if !protected.iter().any(|p| path_has_prefix(&area.prefix, p)) {
                return Err(RouteTableError::UnprotectedArea(area.prefix.clone()));
            }
            for other in &areas[i + 1..] {
                if area.contains(&other.prefix) || other.contains(&area.prefix) {
                    return Err(RouteTableError::OverlappingAreas {
                        first: area.prefix.clone(),
                        second: other.prefix.clone(),
                    });
                }
            }
        }

        if protected.iter().any(|p| path_has_prefix(&public_root, p)) {
            return Err(RouteTableError::ProtectedPublicRoot(public_root));
        }

        Ok(Self { public_root, protected, areas })
    }

    /// Default table with custom edge-protected prefixes.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefixes leave a role area unprotected or
    /// cover the public root.
    pub fn with_protected(protected: Vec<String>) -> Result<Self, RouteTableError> {
        Self::new(DEFAULT_PUBLIC_ROOT, protected, default_areas())
    }

    #[must_use]
    pub fn public_root(&self) -> &str {
        &self.public_root
    }

    #[must_use]
    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected
    }

    #[must_use]
    pub fn areas(&self) -> &[RoleArea] {
        &self.areas
    }

    /// Whether the edge gate must see a session cookie for `path`.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|p| path_has_prefix(path, p))
    }

    /// Role owning `path`, if any area contains it.
    #[must_use]
    pub fn required_role(&self, path: &str) -> Option<Role> {
        self.areas.iter().find(|a| a.contains(path)).map(|a| a.role)
    }

    #[must_use]
    pub fn area(&self, role: Role) -> Option<&RoleArea> {
        self.areas.iter().find(|a| a.role == role)
    }

    /// Landing path for a user of `role`.
    #[must_use]
    pub fn fallback_for(&self, role: Role) -> Option<&str> {
        self.area(role).map(|a| a.fallback.as_str())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            public_root: DEFAULT_PUBLIC_ROOT.to_owned(),
            protected: vec![DEFAULT_PROTECTED_PREFIX.to_owned()],
            areas: default_areas(),
        }
    }
}

/// One area per role under `/dashboard/{role}`, each falling back to its own root.
#[must_use]
pub fn default_areas() -> Vec<RoleArea> {
    Role::ALL
        .into_iter()
        .map(|role| {
            let root = format!("{DEFAULT_PROTECTED_PREFIX}/{}", role.as_str());
            RoleArea::new(role, root.clone(), root)
        })
        .collect()
}

/// Segment-aware prefix match: `/dashboard` matches `/dashboard`,
/// `/dashboard/` and `/dashboard/x`, but not `/dashboards`.
#[must_use]
pub fn path_has_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn ensure_absolute(path: &str) -> Result<(), RouteTableError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(RouteTableError::NotAbsolute(path.to_owned()))
    }
}
