use std::collections::{HashMap, HashSet};

use crate::catalog::Item;

mod build;
mod interaction;
mod links;
mod pick;
mod view;

pub(in crate::app) use build::build_category_graph;
pub(in crate::app) use interaction::{PointerEvent, SessionEvent};
pub(in crate::app) use links::{Link, build_links};
pub(in crate::app) use pick::pick;

/// Which slice of the catalog is turned into a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphFilter {
    /// Only items carrying this tag become nodes, and only this tag counts as shared.
    pub category: Option<String>,
    pub min_shared: usize,
}

impl Default for GraphFilter {
    fn default() -> Self {
        Self {
            category: None,
            min_shared: 1,
        }
    }
}

impl GraphFilter {
    pub(in crate::app) fn select_items(&self, items: &[Item]) -> Vec<Item> {
        match &self.category {
            Some(category) => items
                .iter()
                .filter(|item| item.has_category(category))
                .cloned()
                .collect(),
            None => items.to_vec(),
        }
    }

    pub(in crate::app) fn allowed_tags(&self) -> Option<HashSet<String>> {
        self.category
            .as_ref()
            .map(|category| HashSet::from([category.clone()]))
    }
}

pub(in crate::app) struct GraphNode {
    pub(in crate::app) id: String,
    pub(in crate::app) title: String,
    pub(in crate::app) link: String,
    pub(in crate::app) categories: Vec<String>,
    pub(in crate::app) degree: usize,
}

impl GraphNode {
    pub(in crate::app) fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) struct GraphEdge {
    pub(in crate::app) source: usize,
    pub(in crate::app) target: usize,
    pub(in crate::app) weight: usize,
    pub(in crate::app) shared: Vec<String>,
}

/// Dense node list plus index-referenced edges. Nodes never point at edges.
#[derive(Default)]
pub(in crate::app) struct CategoryGraph {
    pub(in crate::app) nodes: Vec<GraphNode>,
    pub(in crate::app) edges: Vec<GraphEdge>,
    pub(in crate::app) index_by_id: HashMap<String, usize>,
}

impl CategoryGraph {
    pub(in crate::app) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::app) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(in crate::app) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
