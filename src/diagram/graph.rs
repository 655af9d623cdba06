use crate::core::person::PersonName;
use crate::core::transfer::Transfer;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// A directed graph of settlement transfers.
///
/// One node per participant, one weighted edge per payer/receiver pair
/// (parallel transfers between the same pair aggregate into one edge).
/// Edges keep insertion order, so renderers walking [`edges`] reproduce
/// the plan's presentation order.
///
/// [`edges`]: TransferGraph::edges
///
/// # Examples
///
/// ```
/// use split_settle::core::person::PersonName;
/// use split_settle::core::transfer::Transfer;
/// use split_settle::diagram::graph::TransferGraph;
///
/// let graph = TransferGraph::from_transfers(&[
///     Transfer::new(PersonName::new("a"), PersonName::new("c"), 100.0),
///     Transfer::new(PersonName::new("b"), PersonName::new("c"), 100.0),
/// ]);
/// assert_eq!(graph.person_count(), 3);
/// assert_eq!(graph.total_flow(), 200.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransferGraph {
    graph: DiGraph<PersonName, f64>,
    nodes: HashMap<PersonName, NodeIndex>,
}

impl TransferGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a slice of transfers.
    pub fn from_transfers(transfers: &[Transfer]) -> Self {
        let mut graph = Self::new();
        for transfer in transfers {
            graph.add_transfer(transfer);
        }
        graph
    }

    /// Add a single transfer, aggregating onto an existing edge when the
    /// same pair already appears.
    pub fn add_transfer(&mut self, transfer: &Transfer) {
        let from = self.node(transfer.from());
        let to = self.node(transfer.to());
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                if let Some(weight) = self.graph.edge_weight_mut(edge) {
                    *weight += transfer.amount();
                }
            }
            None => {
                self.graph.add_edge(from, to, transfer.amount());
            }
        }
    }

    fn node(&mut self, name: &PersonName) -> NodeIndex {
        if let Some(&index) = self.nodes.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.clone());
        self.nodes.insert(name.clone(), index);
        index
    }

    /// Number of distinct people appearing in any transfer.
    pub fn person_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of payer/receiver pairs.
    pub fn transfer_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total value flowing through the graph.
    pub fn total_flow(&self) -> f64 {
        self.graph.edge_references().map(|e| *e.weight()).sum()
    }

    /// Total a person pays out.
    pub fn outflow(&self, name: &PersonName) -> f64 {
        self.directed_flow(name, Direction::Outgoing)
    }

    /// Total a person receives.
    pub fn inflow(&self, name: &PersonName) -> f64 {
        self.directed_flow(name, Direction::Incoming)
    }

    fn directed_flow(&self, name: &PersonName, direction: Direction) -> f64 {
        match self.nodes.get(name) {
            Some(&index) => self
                .graph
                .edges_directed(index, direction)
                .map(|e| *e.weight())
                .sum(),
            None => 0.0,
        }
    }

    /// A valid settlement never pays in circles: money only flows from
    /// debtors toward creditors.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// All aggregated edges as `(from, to, amount)`, in insertion order.
    pub fn edges(&self) -> Vec<(&PersonName, &PersonName, f64)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    &self.graph[e.source()],
                    &self.graph[e.target()],
                    *e.weight(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(from: &str, to: &str, amount: f64) -> Transfer {
        Transfer::new(PersonName::new(from), PersonName::new(to), amount)
    }

    #[test]
    fn test_graph_basic() {
        let graph = TransferGraph::from_transfers(&[
            transfer("a", "c", 100.0),
            transfer("b", "c", 100.0),
        ]);
        assert_eq!(graph.person_count(), 3);
        assert_eq!(graph.transfer_count(), 2);
        assert_eq!(graph.total_flow(), 200.0);
    }

    #[test]
    fn test_edge_aggregation() {
        let graph = TransferGraph::from_transfers(&[
            transfer("a", "b", 30.0),
            transfer("a", "b", 20.0),
        ]);
        assert_eq!(graph.transfer_count(), 1);
        assert_eq!(graph.total_flow(), 50.0);
    }

    #[test]
    fn test_flows_per_person() {
        let graph = TransferGraph::from_transfers(&[
            transfer("a", "c", 100.0),
            transfer("b", "c", 60.0),
        ]);
        assert_eq!(graph.outflow(&PersonName::new("a")), 100.0);
        assert_eq!(graph.inflow(&PersonName::new("c")), 160.0);
        assert_eq!(graph.outflow(&PersonName::new("c")), 0.0);
        assert_eq!(graph.inflow(&PersonName::new("ghost")), 0.0);
    }

    #[test]
    fn test_settlement_graph_is_acyclic() {
        let graph = TransferGraph::from_transfers(&[
            transfer("a", "c", 100.0),
            transfer("b", "c", 60.0),
            transfer("b", "d", 40.0),
        ]);
        assert!(graph.is_acyclic());
    }

    #[test]
    fn test_cycle_detected() {
        let graph = TransferGraph::from_transfers(&[
            transfer("a", "b", 10.0),
            transfer("b", "a", 10.0),
        ]);
        assert!(!graph.is_acyclic());
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let graph = TransferGraph::from_transfers(&[
            transfer("b", "c", 60.0),
            transfer("a", "c", 100.0),
        ]);
        let edges = graph.edges();
        assert_eq!(edges[0].0.as_str(), "b");
        assert_eq!(edges[1].0.as_str(), "a");
    }
}
