//! Search tree with arena allocation.
//!
//! Nodes live in a Vec and are addressed by `NodeId`. Each node owns its children by id
//! and keeps a non-owning parent id, so there are no reference cycles.

use crate::solver::tt::ProofRecord;
use crate::state::{GameState, Move};
use crate::types::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Moves not yet expanded at a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Untried {
    /// Legal moves have not been generated yet.
    #[default]
    NotGenerated,
    /// Generated; expansion pops from the back.
    Pending(Vec<Move>),
}

/// How a node's proof was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofSource {
    Terminal,
    InstantWin,
    Cached,
    Children,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub state: GameState,
    pub parent: Option<NodeId>,
    /// Move that led here from the parent.
    pub mv: Option<Move>,
    pub children: Vec<NodeId>,
    pub visits: u64,
    /// Outcomes won by player 1, whoever moves at this node.
    pub wins: u64,
    pub untried: Untried,
    pub proof: Option<ProofRecord>,
    pub proof_source: Option<ProofSource>,
}

impl Node {
    fn new(state: GameState, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        Self {
            state,
            parent,
            mv,
            children: Vec::new(),
            visits: 0,
            wins: 0,
            untried: Untried::NotGenerated,
            proof: None,
            proof_source: None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    #[inline]
    pub fn is_proven(&self) -> bool {
        self.proof.is_some()
    }

    /// Moves generated and every one of them expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        matches!(&self.untried, Untried::Pending(m) if m.is_empty())
    }

    #[inline]
    pub fn mover(&self) -> Player {
        self.state.current
    }

    /// Player-1 win rate; 0.0 for an unvisited node.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }

    /// Winner implied by the node's proof, if any.
    #[inline]
    pub fn proven_winner(&self) -> Option<Player> {
        self.proof.map(|p| p.winner())
    }
}

#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(root_state: GameState) -> Self {
        Self {
            nodes: vec![Node::new(root_state, None, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a child of `parent` and link it.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, state: GameState) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(state, Some(parent), Some(mv)));
        self.get_mut(parent).children.push(id);
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

    /// Ids from `id` up to and including the root.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut cur = id;
        while let Some(p) = self.get(cur).parent {
            path.push(p);
            cur = p;
        }
        path
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    #[inline]
    pub fn proven_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_proven()).count()
    }
}
