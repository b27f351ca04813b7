//! Unit dependency graph for the build driver using petgraph
//!
//! Nodes are compilation units (source paths without extension); an edge runs
//! from a dependency to the unit that imports it.

use petgraph::{algo, graph::NodeIndex, Graph as PetGraph};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directed graph of compilation units
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    /// The underlying petgraph directed graph
    graph: PetGraph<PathBuf, ()>,
    /// Map from unit path to graph node index
    unit_to_node: HashMap<PathBuf, NodeIndex>,
}

/// Result of ordering the units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOrder {
    /// Units with dependencies first; empty when a cycle exists
    pub compilation_order: Vec<PathBuf>,
    /// A unit taking part in an import cycle, if any
    pub cycle_member: Option<PathBuf>,
}

impl BuildGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `unit` has already been added
    pub fn contains(&self, unit: &Path) -> bool {
        self.unit_to_node.contains_key(unit)
    }

    /// Add `unit`, returning its node; adding twice is a no-op
    pub fn add_unit(&mut self, unit: &Path) -> NodeIndex {
        if let Some(&node_idx) = self.unit_to_node.get(unit) {
            node_idx
        } else {
            let node_idx = self.graph.add_node(unit.to_path_buf());
            self.unit_to_node.insert(unit.to_path_buf(), node_idx);
            node_idx
        }
    }

    /// Record that `dependent` imports `dependency`
    pub fn add_dependency(&mut self, dependent: &Path, dependency: &Path) {
        let from = self.add_unit(dependency);
        let to = self.add_unit(dependent);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Direct local imports of `unit`
    pub fn dependencies_of(&self, unit: &Path) -> Vec<&Path> {
        let Some(&node_idx) = self.unit_to_node.get(unit) else {
            return Vec::new();
        };
        let mut deps: Vec<&Path> = self
            .graph
            .neighbors_directed(node_idx, petgraph::Direction::Incoming)
            .map(|idx| self.graph[idx].as_path())
            .collect();
        deps.sort();
        deps
    }

    pub fn unit_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Topological order of all units, dependencies first
    pub fn resolve(&self) -> BuildOrder {
        match algo::toposort(&self.graph, None) {
            Ok(sorted_nodes) => BuildOrder {
                compilation_order: sorted_nodes
                    .iter()
                    .map(|&idx| self.graph[idx].clone())
                    .collect(),
                cycle_member: None,
            },
            Err(cycle) => BuildOrder {
                compilation_order: Vec::new(),
                cycle_member: Some(self.graph[cycle.node_id()].clone()),
            },
        }
    }
}
