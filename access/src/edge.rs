//! Pre-render request check on token presence.
//!
//! The edge has no resolved user, only the cookie jar, so it never inspects
//! roles. It exists to keep anonymous visitors from ever seeing a protected
//! page shell; role enforcement happens in the layout gate and, for data, in
//! the backend.

#[cfg(test)]
#[path = "edge_test.rs"]
mod edge_test;

use crate::routes::RouteTable;

/// Outcome of the edge check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Let the request through unmodified.
    Allow,
    /// Answer with a redirect to the given path.
    Redirect(String),
}

/// Decide whether a request for `path` may proceed.
///
/// An empty cookie value counts as absent.
#[must_use]
pub fn evaluate_edge(table: &RouteTable, path: &str, token: Option<&str>) -> EdgeDecision {
    let has_token = token.is_some_and(|t| !t.trim().is_empty());
    if table.is_protected(path) && !has_token {
        EdgeDecision::Redirect(table.public_root().to_owned())
    } else {
        EdgeDecision::Allow
    }
}
