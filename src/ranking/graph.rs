//! Weighted contest graph over canonical competitor names.
//!
//! The graph is either directed or undirected, picked once from the
//! [`EdgePolicy`] when it is created; insertion goes through the same
//! [`CompetitorGraph::add_edge`] call in both cases. Nodes keep their first
//! insertion order, which is also the tie-break order of the final ranking.

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, EdgeType, Undirected};

use super::types::{Competitor, EdgeMerge, EdgePolicy};
use super::weighting::TimeDecay;
use crate::domain::ContestRecord;
use crate::normalization::NameNormalizer;

#[derive(Debug, Clone)]
pub struct NamedGraph<Ty: EdgeType> {
    graph: Graph<Competitor, f64, Ty>,
    index: HashMap<Competitor, NodeIndex>,
}

impl<Ty: EdgeType> NamedGraph<Ty> {
    fn new() -> Self {
        Self {
            graph: Graph::default(),
            index: HashMap::new(),
        }
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    fn add_edge(&mut self, source: &str, target: &str, weight: f64, merge: EdgeMerge) {
        let s = self.node(source);
        let t = self.node(target);

        match self.graph.find_edge(s, t) {
            Some(edge) => match merge {
                EdgeMerge::Overwrite => self.graph[edge] = weight,
                EdgeMerge::Sum => self.graph[edge] += weight,
            },
            None => {
                self.graph.add_edge(s, t, weight);
            }
        }
    }

    fn edge_weight(&self, source: &str, target: &str) -> Option<f64> {
        let s = *self.index.get(source)?;
        let t = *self.index.get(target)?;
        self.graph.find_edge(s, t).map(|edge| self.graph[edge])
    }

    fn competitors(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Outgoing `(target, weight)` lists indexed by node position
    fn out_edges(&self) -> Vec<Vec<(usize, f64)>> {
        let mut out = vec![Vec::new(); self.graph.node_count()];

        for edge in self.graph.edge_references() {
            let (s, t) = (edge.source().index(), edge.target().index());
            out[s].push((t, *edge.weight()));
            if !self.graph.is_directed() && s != t {
                out[t].push((s, *edge.weight()));
            }
        }

        out
    }
}

#[derive(Debug, Clone)]
pub enum CompetitorGraph {
    Directed(NamedGraph<Directed>),
    Undirected(NamedGraph<Undirected>),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            CompetitorGraph::Directed($g) => $body,
            CompetitorGraph::Undirected($g) => $body,
        }
    };
}

impl CompetitorGraph {
    pub fn new(policy: EdgePolicy) -> Self {
        if policy.is_directed() {
            CompetitorGraph::Directed(NamedGraph::new())
        } else {
            CompetitorGraph::Undirected(NamedGraph::new())
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, CompetitorGraph::Directed(_))
    }

    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64, merge: EdgeMerge) {
        dispatch!(self, g => g.add_edge(source, target, weight, merge))
    }

    pub fn node_count(&self) -> usize {
        dispatch!(self, g => g.graph.node_count())
    }

    pub fn edge_count(&self) -> usize {
        dispatch!(self, g => g.graph.edge_count())
    }

    /// For an undirected graph the order of the two names is irrelevant
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge_weight(source, target).is_some()
    }

    pub fn edge_weight(&self, source: &str, target: &str) -> Option<f64> {
        dispatch!(self, g => g.edge_weight(source, target))
    }

    pub fn competitors(&self) -> Vec<&str> {
        dispatch!(self, g => g.competitors())
    }

    pub fn out_edges(&self) -> Vec<Vec<(usize, f64)>> {
        dispatch!(self, g => g.out_edges())
    }
}

/// Turns contest records into a [`CompetitorGraph`]
pub struct GraphBuilder<'a> {
    normalizer: &'a NameNormalizer,
    decay: TimeDecay,
    policy: EdgePolicy,
    draw_share: f64,
    merge: EdgeMerge,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        normalizer: &'a NameNormalizer,
        decay: TimeDecay,
        policy: EdgePolicy,
        draw_share: f64,
        merge: EdgeMerge,
    ) -> Self {
        Self {
            normalizer,
            decay,
            policy,
            draw_share,
            merge,
        }
    }

    pub fn build(&self, records: &[ContestRecord]) -> CompetitorGraph {
        let mut graph = CompetitorGraph::new(self.policy);

        for (idx, record) in records.iter().enumerate() {
            self.add_record(&mut graph, idx, record);
        }

        graph
    }

    fn add_record(&self, graph: &mut CompetitorGraph, idx: usize, record: &ContestRecord) {
        let Some(date) = record.date else {
            debug!("Skipping record #{}: no date", idx);
            return;
        };

        let a = self.normalizer.normalize(&record.competitor_a);
        let b = self.normalizer.normalize(&record.competitor_b);
        if a.is_empty() || b.is_empty() {
            debug!("Skipping record #{}: empty competitor name", idx);
            return;
        }

        let weight = self.decay.weight(date);

        match record.a_won {
            Some(a_won) => {
                let (winner, loser) = if a_won { (&a, &b) } else { (&b, &a) };
                let (source, target) = self.policy.orient(winner, loser);
                graph.add_edge(source, target, weight, self.merge);
            }
            None => {
                let share = weight * self.draw_share;
                graph.add_edge(&a, &b, share, self.merge);
                graph.add_edge(&b, &a, share, self.merge);
            }
        }
    }
}
