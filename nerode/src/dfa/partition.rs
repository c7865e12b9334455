use crate::dfa::Dfa;
use crate::StateId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Splits the given states of a DFA into language-equivalence classes by partition
/// refinement. Two states end up in the same block if and only if they agree on acceptance
/// for every input string. The initial partition separates accepting from non-accepting
/// states (empty blocks omitted); a refinement pass splits a block by the class of each
/// member's σ-successor; the fixed point is reached when a full pass changes nothing.
/// The returned blocks are sorted by their least member and are never empty.
pub(crate) fn refine(dfa: &Dfa, states: &BTreeSet<StateId>) -> Vec<BTreeSet<StateId>> {
    let (accepting, rejecting): (BTreeSet<StateId>, BTreeSet<StateId>) = states
        .iter()
        .copied()
        .partition(|state| dfa.accepting.contains(state));
    let mut blocks: Vec<BTreeSet<StateId>> = [accepting, rejecting]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();

    loop {
        let class_of: HashMap<StateId, usize> = blocks
            .iter()
            .enumerate()
            .flat_map(|(class, block)| block.iter().map(move |&state| (state, class)))
            .collect();

        let mut next = Vec::with_capacity(blocks.len());
        let mut changed = false;
        for block in &blocks {
            match split(dfa, block, &class_of) {
                Some(parts) => {
                    changed = true;
                    next.extend(parts);
                }
                None => next.push(block.clone()),
            }
        }
        blocks = next;

        if !changed {
            break;
        }
    }

    blocks.sort_by_key(|block| block.iter().next().copied());
    blocks
}

/// Tries to split one block on one symbol, grouping the members by the class their
/// σ-successor belongs to. Returns the sub-blocks for the first symbol that separates the
/// block into more than one group, or `None` if no symbol does.
fn split(
    dfa: &Dfa,
    block: &BTreeSet<StateId>,
    class_of: &HashMap<StateId, usize>,
) -> Option<Vec<BTreeSet<StateId>>> {
    for &symbol in &dfa.alphabet {
        let mut groups: BTreeMap<usize, BTreeSet<StateId>> = BTreeMap::new();
        for &state in block {
            let successor = dfa
                .transition(state, symbol)
                .expect("the transition function should be total");
            groups.entry(class_of[&successor]).or_default().insert(state);
        }
        if groups.len() > 1 {
            return Some(groups.into_values().collect());
        }
    }
    None
}
