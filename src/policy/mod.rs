pub mod least_used;

pub use least_used::{Selection, select_victims};
