//! MCTS tree node representation.
//!
//! Nodes do not store game states; a simulation replays actions from the
//! root. A decision node's `action` indexes the parent state's legal
//! actions. Chance nodes stand for a chance action and own one outcome child
//! per sample; an outcome child's `action` is its sample index.

use engine_core::PlayerId;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Decision,
    /// Outcome `i` is replayed with seed `base_seed + i`.
    Chance { base_seed: u64 },
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Legal-action index, or outcome index under a chance node.
    pub action: u32,

    pub kind: NodeKind,

    /// Player who chose the edge into this node.
    pub player: PlayerId,

    pub visit_count: u32,

    /// Sum of rewards backed up through this node.
    pub value_sum: f64,

    /// Empty until the node is expanded.
    pub children: Vec<NodeId>,
}

impl MctsNode {
    pub fn new_root(player: PlayerId) -> Self {
        Self::new_child(NodeId::NONE, 0, NodeKind::Decision, player)
    }

    pub fn new_child(parent: NodeId, action: u32, kind: NodeKind, player: PlayerId) -> Self {
        Self {
            parent,
            action,
            kind,
            player,
            visit_count: 0,
            value_sum: 0.0,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_chance(&self) -> bool {
        matches!(self.kind, NodeKind::Chance { .. })
    }

    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / f64::from(self.visit_count)
        }
    }

    /// UCT score: `mean + c * sqrt(ln(N_parent) / N)`, infinite when unvisited.
    ///
    /// Takes `ln(N_parent)` precomputed so siblings share one logarithm.
    #[inline]
    pub fn uct_score(&self, ln_parent_visits: f64, c: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = f64::from(self.visit_count);
        self.mean_value() + c * (ln_parent_visits / n).sqrt()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(1);
        assert!(node.parent.is_none());
        assert_eq!(node.player, 1);
        assert_eq!(node.visit_count, 0);
        assert!(!node.is_chance());
        assert!(!node.is_expanded());
    }

    #[test]
    fn test_mean_value() {
        let mut node = MctsNode::new_root(0);
        assert!(node.mean_value().abs() < 1e-12);

        node.visit_count = 4;
        node.value_sum = 3.0;
        assert!((node.mean_value() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_child(NodeId(0), 0, NodeKind::Decision, 0);
        assert_eq!(node.uct_score(1.0, 2.0), f64::INFINITY);

        node.visit_count = 10;
        node.value_sum = 5.0;
        let ln_parent = (100.0f64).ln();
        // 0.5 + 2 * sqrt(4.605 / 10) = 0.5 + 1.357
        let score = node.uct_score(ln_parent, 2.0);
        assert!((score - 1.857).abs() < 0.01);
    }

    #[test]
    fn test_chance_kind() {
        let node = MctsNode::new_child(NodeId(0), 3, NodeKind::Chance { base_seed: 9 }, 0);
        assert!(node.is_chance());
        assert_eq!(node.action, 3);
    }
}
