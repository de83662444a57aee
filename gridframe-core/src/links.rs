//! Component link graph: cross-breakpoint identity groups.
//!
//! A link declares that two placements on different breakpoints are the
//! same logical UI element. Links are undirected; a link group is a
//! maximal connected set of ids. Connectivity is computed with a hash-map
//! union-find (path compression + union by rank), so group queries stay
//! near-O(1) amortized per edge and cycles terminate trivially.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// An undirected identity edge between two component ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLink {
    /// One endpoint.
    pub source: String,
    /// The other endpoint.
    pub target: String,
}

impl ComponentLink {
    /// Create a link between two component ids.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Endpoints in a direction-independent canonical order.
    #[must_use]
    pub fn canonical(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }
}

/// Error codes for link validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkErrorCode {
    /// Link source is not a known component id.
    OrphanSource,
    /// Link target is not a known component id.
    OrphanTarget,
    /// Link connects a component to itself.
    SelfLoop,
    /// Link repeats an earlier edge (direction-independent).
    DuplicateLink,
}

/// A single link validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDiagnostic {
    /// Machine-readable code.
    pub code: LinkErrorCode,
    /// Human-readable description.
    pub message: String,
    /// The offending edge's source.
    pub source: String,
    /// The offending edge's target.
    pub target: String,
}

/// Outcome of validating an edge list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    /// Exactly `errors.is_empty()`.
    pub valid: bool,
    /// All findings; link validation has no warning tier.
    pub errors: Vec<LinkDiagnostic>,
}

/// Hash-map backed union-find over interned component ids.
///
/// Ids are interned in first-seen order, which makes every derived
/// ordering deterministic without sorting.
#[derive(Debug, Default)]
struct UnionFind {
    index: HashMap<String, usize>,
    ids: Vec<String>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn intern(&mut self, id: &str) -> usize {
        if let Some(&index) = self.index.get(id) {
            return index;
        }
        let index = self.ids.len();
        self.index.insert(id.to_string(), index);
        self.ids.push(id.to_string());
        self.parent.push(index);
        self.rank.push(0);
        index
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            // Path halving.
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
    }
}

/// Connectivity over a fixed edge list, resolved at construction.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    /// Resolved root per interned id.
    root: Vec<usize>,
}

impl LinkGraph {
    /// Build the graph and resolve every connected component.
    #[must_use]
    pub fn from_edges(edges: &[ComponentLink]) -> Self {
        let mut uf = UnionFind::default();
        for edge in edges {
            let source = uf.intern(&edge.source);
            let target = uf.intern(&edge.target);
            uf.union(source, target);
        }
        let root = (0..uf.ids.len()).map(|node| uf.find(node)).collect();
        Self {
            ids: uf.ids,
            index: uf.index,
            root,
        }
    }

    /// All link groups, members and groups in first-seen edge order.
    ///
    /// Ids mentioned in no edge do not appear.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<String>> {
        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<String>> = Vec::new();
        for (node, id) in self.ids.iter().enumerate() {
            let root = self.root[node];
            let slot = *by_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(id.clone());
        }
        groups
    }

    /// The group containing `id`.
    ///
    /// When `strict` is false, an id that appears in no edge is treated as
    /// linked only to itself and yields the singleton `[id]`; when `strict`
    /// is true it yields `None`.
    #[must_use]
    pub fn get_group(&self, id: &str, strict: bool) -> Option<Vec<String>> {
        match self.index.get(id) {
            Some(&node) => {
                let root = self.root[node];
                Some(
                    self.ids
                        .iter()
                        .enumerate()
                        .filter(|&(other, _)| self.root[other] == root)
                        .map(|(_, other_id)| other_id.clone())
                        .collect(),
                )
            }
            None if strict => None,
            None => Some(vec![id.to_string()]),
        }
    }

    /// Whether `b` belongs to `a`'s group, strictly.
    ///
    /// `false` whenever `a` appears in no edge, so `are_linked(a, a)` is
    /// `true` exactly when `a` participates in at least one link.
    #[must_use]
    pub fn are_linked(&self, a: &str, b: &str) -> bool {
        let (Some(&node_a), Some(&node_b)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        self.root[node_a] == self.root[node_b]
    }
}

/// Connected components of the undirected graph induced by `edges`.
#[must_use]
pub fn compute_groups(edges: &[ComponentLink]) -> Vec<Vec<String>> {
    LinkGraph::from_edges(edges).groups()
}

/// The group containing `id`; see [`LinkGraph::get_group`].
#[must_use]
pub fn get_group(id: &str, edges: &[ComponentLink], strict: bool) -> Option<Vec<String>> {
    LinkGraph::from_edges(edges).get_group(id, strict)
}

/// Whether `a` and `b` are in the same group; see [`LinkGraph::are_linked`].
#[must_use]
pub fn are_linked(a: &str, b: &str, edges: &[ComponentLink]) -> bool {
    LinkGraph::from_edges(edges).are_linked(a, b)
}

/// Validate an edge list against the set of known component ids.
///
/// Each edge is checked independently; all findings are collected.
#[must_use]
pub fn validate_links(edges: &[ComponentLink], valid_ids: &HashSet<&str>) -> LinkReport {
    let mut errors = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for edge in edges {
        if !valid_ids.contains(edge.source.as_str()) {
            errors.push(diagnostic(
                LinkErrorCode::OrphanSource,
                format!("Link source '{}' is not a known component", edge.source),
                edge,
            ));
        }
        if !valid_ids.contains(edge.target.as_str()) {
            errors.push(diagnostic(
                LinkErrorCode::OrphanTarget,
                format!("Link target '{}' is not a known component", edge.target),
                edge,
            ));
        }
        if edge.source == edge.target {
            errors.push(diagnostic(
                LinkErrorCode::SelfLoop,
                format!("Component '{}' is linked to itself", edge.source),
                edge,
            ));
        }

        let (a, b) = edge.canonical();
        if !seen.insert((a.to_string(), b.to_string())) {
            errors.push(diagnostic(
                LinkErrorCode::DuplicateLink,
                format!("Link between '{a}' and '{b}' is declared more than once"),
                edge,
            ));
        }
    }

    LinkReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn diagnostic(code: LinkErrorCode, message: String, edge: &ComponentLink) -> LinkDiagnostic {
    LinkDiagnostic {
        code,
        message,
        source: edge.source.clone(),
        target: edge.target.clone(),
    }
}
