// Automaton statistics.

use std::fmt;

use crate::Fsa;
use crate::visit::visit_all_states;

/// Node and arc counts of an automaton, computed by visiting every state once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsaInfo {
    /// Number of distinct states reachable from the root.
    pub nodes: usize,
    /// Arcs leaving those states (shared states counted once).
    pub arcs: usize,
    /// Arcs marked final.
    pub final_arcs: usize,
    /// Arcs without a destination state.
    pub terminal_arcs: usize,
    /// Size of the arc blob in bytes, when known.
    pub size: Option<usize>,
}

impl FsaInfo {
    pub fn new<F: Fsa + ?Sized>(fsa: &F) -> Self {
        let mut info = FsaInfo {
            size: fsa.size_in_bytes(),
            ..FsaInfo::default()
        };
        visit_all_states(fsa, |node| {
            info.nodes += 1;
            let mut arc = fsa.first_arc(node);
            while arc != 0 {
                info.arcs += 1;
                if fsa.is_arc_final(arc) {
                    info.final_arcs += 1;
                }
                if fsa.is_arc_terminal(arc) {
                    info.terminal_arcs += 1;
                }
                arc = fsa.next_arc(arc);
            }
            true
        });
        info
    }
}

impl fmt::Display for FsaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {}, arcs: {}, final arcs: {}, terminal arcs: {}",
            self.nodes, self.arcs, self.final_arcs, self.terminal_arcs
        )?;
        if let Some(size) = self.size {
            write!(f, ", size: {size} bytes")?;
        }
        Ok(())
    }
}
