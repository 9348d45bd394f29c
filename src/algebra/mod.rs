//! __pivotal__ linear algebra module.
//!
//! Dense matrix storage, vector operations and the updatable Cholesky
//! factorization used to maintain the basis of the pivoting solvers.
//! All floating point operations are generic over [`FloatT`].

mod dense;
mod error_types;
mod floats;
mod math_traits;
mod vecmath;

pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
