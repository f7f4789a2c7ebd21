// Whole-automaton state visitors.
//
// Both orders use an explicit stack of (node, next arc) frames and a visited
// set keyed by node offset, so depth is bounded only by memory.

use hashbrown::HashSet;

use crate::Fsa;

/// Visit every state reachable from `node` once, children before parents.
///
/// Arcs are followed in order. The visitor returns `false` to abort the whole
/// traversal, in which case this function returns `false`.
pub fn visit_in_post_order<F, V>(fsa: &F, node: usize, mut visitor: V) -> bool
where
    F: Fsa + ?Sized,
    V: FnMut(usize) -> bool,
{
    if node == 0 {
        return true;
    }

    let mut visited = HashSet::new();
    visited.insert(node);
    let mut stack = vec![(node, fsa.first_arc(node))];

    while let Some(frame) = stack.last_mut() {
        let (current, arc) = *frame;
        if arc == 0 {
            stack.pop();
            if !visitor(current) {
                return false;
            }
            continue;
        }

        frame.1 = fsa.next_arc(arc);
        if !fsa.is_arc_terminal(arc) {
            let child = fsa.end_node(arc);
            if visited.insert(child) {
                stack.push((child, fsa.first_arc(child)));
            }
        }
    }
    true
}

/// Visit every state reachable from `node` once, parents before children.
///
/// Returning `false` from the visitor skips the sub-states of the state just
/// visited; states reachable along another path are still visited.
pub fn visit_in_pre_order<F, V>(fsa: &F, node: usize, mut visitor: V)
where
    F: Fsa + ?Sized,
    V: FnMut(usize) -> bool,
{
    if node == 0 {
        return;
    }

    let mut visited = HashSet::new();
    visited.insert(node);
    if !visitor(node) {
        return;
    }
    let mut stack = vec![(node, fsa.first_arc(node))];

    while let Some(frame) = stack.last_mut() {
        let arc = frame.1;
        if arc == 0 {
            stack.pop();
            continue;
        }

        frame.1 = fsa.next_arc(arc);
        if !fsa.is_arc_terminal(arc) {
            let child = fsa.end_node(arc);
            if visited.insert(child) && visitor(child) {
                stack.push((child, fsa.first_arc(child)));
            }
        }
    }
}

/// Post-order visit of every state reachable from the root.
pub fn visit_all_states<F, V>(fsa: &F, visitor: V) -> bool
where
    F: Fsa + ?Sized,
    V: FnMut(usize) -> bool,
{
    visit_in_post_order(fsa, fsa.root_node(), visitor)
}
