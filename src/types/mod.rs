//! Type definitions for seriesfill

mod error;
mod record;
mod series;

pub use error::*;
pub use record::*;
pub use series::*;
