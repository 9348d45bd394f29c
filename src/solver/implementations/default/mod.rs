#![allow(non_snake_case)]

mod basis;
mod info;
mod info_print;
pub(crate) mod pivoting;
mod problemdata;
mod residuals;
mod settings;
mod solver;
mod variables;

//export flattened
pub(crate) use basis::*;
pub use info::*;
pub use problemdata::*;
pub use residuals::*;
pub use settings::*;
pub use solver::*;
pub use variables::*;
