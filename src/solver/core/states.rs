#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complementarity state of a single variable.
///
/// Exactly one of `z[i]` and `w[i]` is free for each variable.  A basic
/// variable has `z[i]` free (and `w[i] = 0`).  A non-basic variable has
/// `z[i]` pinned to one of its bounds and `w[i]` free.
#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariableState {
    /// `z[i]` is free and the variable belongs to the basis.
    ZBasic,
    /// `z[i]` is pinned at its lower bound.
    #[default]
    WLower,
    /// `z[i]` is pinned at its upper bound.
    WUpper,
}

impl VariableState {
    /// Single character code: `'Z'`, `'L'` or `'H'`.
    pub fn as_char(self) -> char {
        match self {
            VariableState::ZBasic => 'Z',
            VariableState::WLower => 'L',
            VariableState::WUpper => 'H',
        }
    }

    /// Inverse of [`as_char`](VariableState::as_char).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'Z' => Some(VariableState::ZBasic),
            'L' => Some(VariableState::WLower),
            'H' => Some(VariableState::WUpper),
            _ => None,
        }
    }

    pub fn is_basic(self) -> bool {
        matches!(self, VariableState::ZBasic)
    }
}

impl std::fmt::Display for VariableState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error type returned when parsing a state string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateParseError {
    #[error("invalid state code '{code}' at position {position}")]
    BadCode { code: char, position: usize },
}

/// Renders a state vector as a compact string, one character per variable.
///
/// ```
/// use pivotal::solver::{states_to_string, VariableState::*};
///
/// assert_eq!(states_to_string(&[ZBasic, WLower, WUpper]), "ZLH");
/// ```
pub fn states_to_string(states: &[VariableState]) -> String {
    states.iter().map(|s| s.as_char()).collect()
}

/// Parses a state string produced by [`states_to_string`].  Whitespace
/// is ignored, so "Z L H" and "ZLH" are equivalent.
pub fn states_from_str(s: &str) -> Result<Vec<VariableState>, StateParseError> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(position, code)| {
            VariableState::from_char(code).ok_or(StateParseError::BadCode { code, position })
        })
        .collect()
}
