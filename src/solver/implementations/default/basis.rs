#![allow(non_snake_case)]

use super::variables::default_bound_state;
use super::DefaultProblemData;
use crate::algebra::*;
use crate::solver::core::{LcpError, VariableState};

/// The set of basic variables together with the Cholesky factor of the
/// principal submatrix `M[B,B]`.
///
/// Position `k` of the factor corresponds to variable `basic()[k]`.
/// Additions append at the end and removals shift the later positions
/// down, so the two orderings always agree.
pub(crate) struct Basis<T> {
    factor: Box<dyn FactorCholesky<T> + Send>,
    // pivoted position -> variable index
    pivoted_to_initial: Vec<usize>,
    // variable index -> pivoted position
    initial_to_pivoted: Vec<Option<usize>>,
    // workspaces
    col: Vec<T>,
    sub: Matrix<T>,
}

impl<T> Basis<T>
where
    T: FloatT,
{
    #[cfg(test)]
    pub fn new(capacity: usize) -> Self {
        Self::with_factorization(Box::new(CholeskyEngine::new(capacity)))
    }

    pub fn with_factorization(factor: Box<dyn FactorCholesky<T> + Send>) -> Self {
        Self {
            factor,
            pivoted_to_initial: vec![],
            initial_to_pivoted: vec![],
            col: vec![],
            sub: Matrix::zeros((0, 0)),
        }
    }

    /// Empties the basis for a problem of size `n`
    pub fn reset(&mut self, n: usize) {
        self.factor.clear();
        self.factor.ensure_capacity(n);
        self.pivoted_to_initial.clear();
        self.initial_to_pivoted.clear();
        self.initial_to_pivoted.resize(n, None);
    }

    /// Basic variables in factor order
    pub fn basic(&self) -> &[usize] {
        &self.pivoted_to_initial
    }

    pub fn num_basic(&self) -> usize {
        self.pivoted_to_initial.len()
    }

    pub fn position(&self, i: usize) -> Option<usize> {
        self.initial_to_pivoted[i]
    }

    /// Appends variable `i` to the basis.  Returns false, leaving the
    /// basis unchanged, if `M[B∪i,B∪i]` is numerically singular.
    pub fn try_add(&mut self, i: usize, M: &Matrix<T>, perturbation: T) -> bool {
        debug_assert!(self.initial_to_pivoted[i].is_none());
        let Mi = M.col_slice(i);
        self.col.clear();
        self.col
            .extend(self.pivoted_to_initial.iter().map(|&j| Mi[j]));
        self.col.push(Mi[i]);

        if !self.factor.add_row_and_column(&self.col, perturbation) {
            return false;
        }
        self.initial_to_pivoted[i] = Some(self.pivoted_to_initial.len());
        self.pivoted_to_initial.push(i);
        true
    }

    /// Removes variable `i` from the basis
    pub fn remove(&mut self, i: usize) {
        let Some(k) = self.initial_to_pivoted[i] else {
            return;
        };
        self.factor.delete_row_and_column(k);
        self.pivoted_to_initial.remove(k);
        self.initial_to_pivoted[i] = None;
        for (p, &j) in self.pivoted_to_initial.iter().enumerate().skip(k) {
            self.initial_to_pivoted[j] = Some(p);
        }
    }

    /// Builds the basis from the `ZBasic` entries of `states`.
    ///
    /// Variables that cannot be added without making the basis singular
    /// are moved to a bound state, and their indices are returned.  A
    /// singular prefix variable is an error since it may not leave the
    /// basis.
    pub fn factor_from_states(
        &mut self,
        data: &DefaultProblemData<T>,
        states: &mut [VariableState],
        perturbation: T,
    ) -> Result<Vec<usize>, LcpError> {
        self.reset(data.n);
        let candidates: Vec<usize> = states
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_basic().then_some(i))
            .collect();

        if candidates.is_empty() {
            return Ok(vec![]);
        }

        // one shot factorization of the full set
        data.M.principal_submatrix(&candidates, &mut self.sub);
        if self.factor.factor(&self.sub).is_ok() {
            for (k, &i) in candidates.iter().enumerate() {
                self.initial_to_pivoted[i] = Some(k);
            }
            self.pivoted_to_initial = candidates;
            return Ok(vec![]);
        }

        // salvage as many as possible, one at a time
        self.reset(data.n);
        let mut demoted = vec![];
        for i in candidates {
            if self.try_add(i, &data.M, perturbation) {
                continue;
            }
            if i < data.nub {
                return Err(LcpError::SingularPrefix(i));
            }
            states[i] = default_bound_state(data.lo[i]);
            demoted.push(i);
        }
        Ok(demoted)
    }

    /// Solves `M[B,B] x = b` in place, with `b` in factor order
    pub fn solve(&self, x: &mut [T]) {
        self.factor.solve(x);
    }

    /// Condition estimate of `M[B,B]`
    pub fn condition_estimate(&mut self, M: &Matrix<T>) -> Result<T, LcpError> {
        M.principal_submatrix(&self.pivoted_to_initial, &mut self.sub);
        Ok(self.factor.condition_estimate(&self.sub)?)
    }
}

impl<T> std::fmt::Debug for Basis<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Basis")
            .field("basic", &self.pivoted_to_initial)
            .finish()
    }
}
