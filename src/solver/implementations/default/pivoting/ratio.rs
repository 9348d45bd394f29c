use super::super::Basis;
use crate::algebra::*;
use crate::solver::core::{SettingsError, VariableState};
use enum_dispatch::*;
use std::marker::PhantomData;

/// A basic variable that reaches one of its bounds when the driving
/// variable moves by `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RatioCandidate<T> {
    pub index: usize,
    pub step: T,
    /// rate of change of `z[index]` along the drive
    pub slope: T,
    pub to: VariableState,
}

#[enum_dispatch]
pub(crate) trait RatioTest<T>
where
    T: FloatT,
{
    /// Picks the blocking variable among `tied`, all of which block
    /// within tolerance of the shortest step.  Returns a position in `tied`.
    fn select(&mut self, tied: &[RatioCandidate<T>], basis: &Basis<T>, tol: T) -> usize;
}

#[enum_dispatch(RatioTest<T>)]
pub(crate) enum RatioTests<T>
where
    T: FloatT,
{
    MinimumRatio(MinimumRatio<T>),
    LexicographicRatio(LexicographicRatio<T>),
}

impl<T> RatioTests<T>
where
    T: FloatT,
{
    pub fn new(name: &str) -> Result<Self, SettingsError> {
        match name {
            "minimum" => Ok(MinimumRatio::default().into()),
            "lexicographic" => Ok(LexicographicRatio::default().into()),
            _ => Err(SettingsError::BadFieldValue("ratio_test")),
        }
    }
}

// ---------------
// plain minimum ratio
// ---------------

/// Shortest step wins, lowest position among exact ties.
#[derive(Debug, Default)]
pub(crate) struct MinimumRatio<T> {
    phantom: PhantomData<T>,
}

impl<T> RatioTest<T> for MinimumRatio<T>
where
    T: FloatT,
{
    fn select(&mut self, tied: &[RatioCandidate<T>], _basis: &Basis<T>, _tol: T) -> usize {
        let mut best = 0;
        for (k, c) in tied.iter().enumerate().skip(1) {
            if c.step < tied[best].step {
                best = k;
            }
        }
        best
    }
}

// ---------------
// lexicographic ratio
// ---------------

/// Breaks ties by comparing the rows of `M[B,B]⁻¹` belonging to the tied
/// variables, each scaled by its slope, one column at a time.  The
/// scaled rows of distinct basic variables are never identical, so the
/// choice is unique and degenerate drives cannot cycle.
#[derive(Debug, Default)]
pub(crate) struct LexicographicRatio<T> {
    col: Vec<T>,
    alive: Vec<usize>,
    keys: Vec<T>,
}

impl<T> RatioTest<T> for LexicographicRatio<T>
where
    T: FloatT,
{
    fn select(&mut self, tied: &[RatioCandidate<T>], basis: &Basis<T>, tol: T) -> usize {
        if tied.len() <= 1 {
            return 0;
        }
        let nb = basis.num_basic();
        self.alive.clear();
        self.alive.extend(0..tied.len());

        for c in 0..nb {
            // column c of the inverse
            self.col.clear();
            self.col.resize(nb, T::zero());
            self.col[c] = T::one();
            basis.solve(&mut self.col);

            self.keys.clear();
            for &k in self.alive.iter() {
                let cand = &tied[k];
                let key = match basis.position(cand.index) {
                    Some(p) => self.col[p] / cand.slope.abs(),
                    None => T::infinity(),
                };
                self.keys.push(key);
            }
            let kmin = self.keys.iter().fold(T::infinity(), |m, &v| T::min(m, v));

            let mut j = 0;
            self.alive.retain(|_| {
                let keep = self.keys[j] <= kmin + tol;
                j += 1;
                keep
            });

            if self.alive.len() <= 1 {
                break;
            }
        }
        self.alive.first().copied().unwrap_or(0)
    }
}
