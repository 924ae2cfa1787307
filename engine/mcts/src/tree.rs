//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices;
//! each node owns its children list. The tree lives for a single move and
//! is dropped afterwards.

use engine_core::PlayerId;

use crate::node::{MctsNode, NodeId, NodeKind};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    pub fn new(root_player: PlayerId) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_player)],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a decision child for the parent's `action`-th legal action.
    pub fn add_child(&mut self, parent_id: NodeId, action: u32, player: PlayerId) -> NodeId {
        let child = self.allocate(MctsNode::new_child(parent_id, action, NodeKind::Decision, player));
        self.get_mut(parent_id).children.push(child);
        child
    }

    /// Add a chance node for the parent's `action`-th legal action, with
    /// `outcomes` pre-allocated outcome children.
    pub fn add_chance_child(
        &mut self,
        parent_id: NodeId,
        action: u32,
        player: PlayerId,
        base_seed: u64,
        outcomes: u32,
    ) -> NodeId {
        let chance = self.allocate(MctsNode::new_child(
            parent_id,
            action,
            NodeKind::Chance { base_seed },
            player,
        ));
        self.get_mut(parent_id).children.push(chance);
        for outcome in 0..outcomes.max(1) {
            self.add_child(chance, outcome, player);
        }
        chance
    }

    /// Child with the highest UCT score; ties go to the earliest child.
    pub fn select_child(&self, node_id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let ln_parent = f64::from(node.visit_count.max(1)).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self.get(child).uct_score(ln_parent, c);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((child, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Walk from `leaf_id` to the root, counting a visit on every node and
    /// adding `reward(node)` to its value sum.
    pub fn backpropagate<F>(&mut self, leaf_id: NodeId, reward: F)
    where
        F: Fn(&MctsNode) -> f64,
    {
        let mut current_id = leaf_id;
        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.value_sum += reward(node);
            current_id = node.parent;
        }
    }

    /// Most visited root child as `(action, visits)`. Equal visit counts
    /// go to the earliest child. `None` if the root has no children.
    pub fn best_action(&self) -> Option<(u32, u32)> {
        let root = self.get(self.root);
        let mut best: Option<&MctsNode> = None;
        for &child in &root.children {
            let node = self.get(child);
            if best.map_or(true, |b| node.visit_count > b.visit_count) {
                best = Some(node);
            }
        }
        best.map(|node| (node.action, node.visit_count))
    }

    /// Visit counts of the root children, in legal-action order.
    pub fn root_visits(&self) -> Vec<u32> {
        self.get(self.root)
            .children
            .iter()
            .map(|&id| self.get(id).visit_count)
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in &self.get(id).children {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree() {
        let tree = MctsTree::new(0);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));
        assert!(tree.get(tree.root()).parent.is_none());
    }

    #[test]
    fn test_add_child() {
        let mut tree = MctsTree::new(0);
        let child_id = tree.add_child(tree.root(), 2, 0);

        assert_eq!(tree.len(), 2);
        assert_eq!(child_id, NodeId(1));
        assert_eq!(tree.get(tree.root()).children, vec![child_id]);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert_eq!(child.action, 2);
    }

    #[test]
    fn test_add_chance_child() {
        let mut tree = MctsTree::new(0);
        let chance = tree.add_chance_child(tree.root(), 1, 0, 77, 3);

        assert_eq!(tree.len(), 5);
        let node = tree.get(chance);
        assert_eq!(node.kind, NodeKind::Chance { base_seed: 77 });
        assert_eq!(node.children.len(), 3);
        for (i, &outcome) in node.children.iter().enumerate() {
            assert_eq!(tree.get(outcome).action, i as u32);
            assert_eq!(tree.get(outcome).parent, chance);
        }
    }

    #[test]
    fn test_backpropagate() {
        let mut tree = MctsTree::new(0);
        let child = tree.add_child(tree.root(), 0, 0);
        let grandchild = tree.add_child(child, 1, 1);

        tree.backpropagate(grandchild, |_| 0.75);
        assert_eq!(tree.get(grandchild).visit_count, 1);
        assert_eq!(tree.get(child).visit_count, 1);
        assert_eq!(tree.get(tree.root()).visit_count, 1);
        assert!((tree.get(tree.root()).value_sum - 0.75).abs() < 1e-12);

        tree.backpropagate(grandchild, |node| if node.player == 1 { 1.0 } else { 0.0 });
        assert!((tree.get(grandchild).value_sum - 1.75).abs() < 1e-12);
        assert!((tree.get(child).value_sum - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_select_child_prefers_unvisited_then_first() {
        let mut tree = MctsTree::new(0);
        let a = tree.add_child(tree.root(), 0, 0);
        let b = tree.add_child(tree.root(), 1, 0);

        assert_eq!(tree.select_child(tree.root(), 2.0), Some(a));

        tree.backpropagate(a, |_| 0.0);
        assert_eq!(tree.select_child(tree.root(), 2.0), Some(b));

        tree.backpropagate(b, |_| 1.0);
        assert_eq!(tree.select_child(tree.root(), 2.0), Some(b));
    }

    #[test]
    fn test_best_action_tie_breaks() {
        let mut tree = MctsTree::new(0);
        let a = tree.add_child(tree.root(), 0, 0);
        let b = tree.add_child(tree.root(), 1, 0);
        tree.get_mut(a).visit_count = 5;
        tree.get_mut(b).visit_count = 5;
        tree.get_mut(b).value_sum = 5.0;
        assert_eq!(tree.best_action(), Some((0, 5)));

        tree.get_mut(b).visit_count = 6;
        assert_eq!(tree.best_action(), Some((1, 6)));
        assert_eq!(tree.root_visits(), vec![5, 6]);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MctsTree::new(0);
        let child = tree.add_child(tree.root(), 0, 0);
        tree.add_chance_child(child, 0, 1, 5, 2);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.max_depth, 3);
    }
}
