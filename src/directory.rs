//! Breadcrumbs: the way back up from any node to the root.

use crate::tree::{NodeId, Tree};
use serde::Serialize;

/// One step of a breadcrumb trail.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Crumb {
    pub label: String,
    pub url: String,
}

impl std::fmt::Display for Crumb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} <{}>", self.label, self.url)
    }
}

impl Tree {
    /// Root first, `node` last.
    pub fn ancestors(&self, node: NodeId) -> Vec<Crumb> {
        let mut crumbs: Vec<Crumb> = std::iter::successors(Some(node), |&n| self.parent(n))
            .map(|n| Crumb {
                label: self.label(n).to_owned(),
                url: self.url(n).to_owned(),
            })
            .collect();
        crumbs.reverse();
        crumbs
    }
}
