use crate::solver::implementations::default::DefaultSettings;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Solver general core settings are the same as in the default solver.
///
/// Go [here](crate::solver::implementations::default::DefaultSettings)
/// to view the complete list.
///
pub type CoreSettings<T> = DefaultSettings<T>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Bit flags selecting which solver events are traced to the
/// solver's print target.
///
/// ```
/// use pivotal::solver::DebugFlags;
///
/// let flags = DebugFlags::PIVOTS | DebugFlags::RETURNS;
/// assert!(flags.contains(DebugFlags::PIVOTS));
/// assert!(!flags.contains(DebugFlags::TOL_UPDATE));
/// ```
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebugFlags(pub u32);

impl DebugFlags {
    pub const NONE: DebugFlags = DebugFlags(0x00);
    /// every basis change
    pub const PIVOTS: DebugFlags = DebugFlags(0x01);
    /// tolerance selection and escalation
    pub const TOL_UPDATE: DebugFlags = DebugFlags(0x02);
    /// fallback from block to single pivoting
    pub const BLOCK_PIVOT_CHANGE: DebugFlags = DebugFlags(0x04);
    /// the full variable table at every round
    pub const VARIABLES: DebugFlags = DebugFlags(0x08);
    /// the termination status of each solve
    pub const RETURNS: DebugFlags = DebugFlags(0x10);
    pub const ALL: DebugFlags = DebugFlags(0x1f);

    /// true if every flag in `other` is also set in `self`
    pub fn contains(self, other: DebugFlags) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for DebugFlags {
    type Output = DebugFlags;
    fn bitor(self, rhs: DebugFlags) -> DebugFlags {
        DebugFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DebugFlags {
    fn bitor_assign(&mut self, rhs: DebugFlags) {
        self.0 |= rhs.0;
    }
}

#[test]
fn test_debug_flags() {
    let mut f = DebugFlags::NONE;
    assert!(f.is_empty());
    assert!(!f.contains(DebugFlags::NONE));
    f |= DebugFlags::VARIABLES;
    assert!(f.contains(DebugFlags::VARIABLES));
    assert!(DebugFlags::ALL.contains(DebugFlags::RETURNS | DebugFlags::PIVOTS));
    assert!(!f.contains(DebugFlags::ALL));
}
