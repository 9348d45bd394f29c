mod cholesky;
mod core;
mod traits;
mod types;

pub use self::cholesky::*;
pub use self::traits::*;
pub use self::types::*;
