use crate::solver::tree::{NodeId, Tree};

/// UCB1 score of `child` under a parent with `parent_visits`.
/// Exploitation uses the stored player-1 win rate at every depth.
#[inline]
pub fn uct_score(wins: u64, visits: u64, parent_visits: u64, exploration: f64) -> f64 {
    debug_assert!(visits > 0, "uct on unvisited child");
    let v = visits as f64;
    let exploit = wins as f64 / v;
    let explore = exploration * ((parent_visits as f64).ln() / v).sqrt();
    exploit + explore
}

/// Pick the highest-scoring child of `id`. Ties keep the first child in expansion order.
/// Only meaningful on fully expanded, unproven, non-terminal nodes.
pub fn select_child(tree: &Tree, id: NodeId, exploration: f64) -> Option<NodeId> {
    let node = tree.get(id);
    let mut best: Option<(NodeId, f64)> = None;
    for &cid in &node.children {
        let child = tree.get(cid);
        let score = uct_score(child.wins, child.visits, node.visits, exploration);
        match best {
            Some((_, s)) if score > s => best = Some((cid, score)),
            None => best = Some((cid, score)),
            _ => {}
        }
    }
    best.map(|(cid, _)| cid)
}
