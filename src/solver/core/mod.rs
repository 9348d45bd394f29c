// package together the core pieces and re-export
// in a partially flattened structure :
// : solver trait, status and error types
// : variable states and their string codec
// : event callbacks
// : core settings types

pub mod callbacks;
pub mod traits;

//partially flatten top level pieces

mod settings;
mod solver;
mod states;
pub use callbacks::SolverEvent;
pub use settings::*;
pub use solver::*;
pub use states::*;
pub use traits::LcpSolver;
