use tracing::trace;

use crate::hash::state_key;
use crate::solver::tree::{NodeId, ProofSource, Tree};
use crate::solver::tt::{ProofRecord, TranspositionTable};

/// Backward-induction verdict for a fully expanded node, from its children's proofs.
///
/// Any child won by the mover makes the node a win for the mover; every child won by
/// the opponent makes it a loss for the mover. Anything else stays open.
pub fn derive_proof(tree: &Tree, id: NodeId) -> Option<ProofRecord> {
    let node = tree.get(id);
    if node.children.is_empty() || !node.is_fully_expanded() {
        return None;
    }
    let mover = node.mover();

    let mut all_lost = true;
    for &cid in &node.children {
        match tree.get(cid).proven_winner() {
            Some(w) if w == mover => return Some(ProofRecord::win(mover)),
            Some(_) => {}
            None => all_lost = false,
        }
    }
    all_lost.then(|| ProofRecord::loss(mover))
}

/// Mark `id` proven and record it in the table.
pub fn mark_proven<T: TranspositionTable + ?Sized>(
    tree: &mut Tree,
    tt: &mut T,
    id: NodeId,
    record: ProofRecord,
    source: ProofSource,
) {
    let node = tree.get_mut(id);
    debug_assert!(node.proof.is_none(), "node proven twice");
    node.proof = Some(record);
    node.proof_source = Some(source);
    tt.put(state_key(&node.state), record);
}

/// Walk from `from` to the root promoting every open ancestor whose children now
/// settle it. Returns how many nodes were newly proven.
pub fn propagate_proofs<T: TranspositionTable + ?Sized>(tree: &mut Tree, tt: &mut T, from: NodeId) -> u64 {
    let mut proven = 0u64;
    let mut cur = Some(from);
    while let Some(id) = cur {
        if !tree.get(id).is_proven() {
            if let Some(record) = derive_proof(tree, id) {
                trace!(node = id.0, ?record, "proved by children");
                mark_proven(tree, tt, id, record, ProofSource::Children);
                proven += 1;
            }
        }
        cur = tree.get(id).parent;
    }
    proven
}
