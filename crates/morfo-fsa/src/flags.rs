// Automaton flag word (big-endian u16 following the header).

use std::fmt;
use std::ops::BitOr;

use crate::FsaError;

/// Set of flags an automaton was compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FsaFlags(u16);

impl FsaFlags {
    /// Nodes have variable size.
    pub const FLEXIBLE: FsaFlags = FsaFlags(1 << 0);
    /// The last arc of a node is marked with a stop bit.
    pub const STOPBIT: FsaFlags = FsaFlags(1 << 1);
    /// Arcs may point at the node that follows their own node.
    pub const NEXTBIT: FsaFlags = FsaFlags(1 << 2);
    /// Common tails are shared.
    pub const TAILS: FsaFlags = FsaFlags(1 << 3);
    /// Nodes are prefixed with their right-language count.
    pub const NUMBERS: FsaFlags = FsaFlags(1 << 8);
    /// Sequences contain separators.
    pub const SEPARATORS: FsaFlags = FsaFlags(1 << 9);

    const NAMED: [(FsaFlags, &'static str); 6] = [
        (FsaFlags::FLEXIBLE, "FLEXIBLE"),
        (FsaFlags::STOPBIT, "STOPBIT"),
        (FsaFlags::NEXTBIT, "NEXTBIT"),
        (FsaFlags::TAILS, "TAILS"),
        (FsaFlags::NUMBERS, "NUMBERS"),
        (FsaFlags::SEPARATORS, "SEPARATORS"),
    ];

    const ALL_BITS: u16 = 0b11_0000_1111;

    pub const fn empty() -> Self {
        FsaFlags(0)
    }

    /// Validate a raw flag word. Any bit outside the known set is rejected.
    pub fn from_bits(bits: u16) -> Result<Self, FsaError> {
        if bits & !Self::ALL_BITS != 0 {
            return Err(FsaError::UnrecognizedFlags(bits));
        }
        Ok(FsaFlags(bits))
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: FsaFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FsaFlags {
    type Output = FsaFlags;

    fn bitor(self, rhs: FsaFlags) -> FsaFlags {
        FsaFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for FsaFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}
