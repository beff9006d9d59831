//! Closed enumerations and lookup tables for 5e rules configuration.

pub mod key;
pub mod table;

pub mod activation;
pub mod actor;
pub mod item;
pub mod spell;
pub mod types;
pub mod units;

pub use activation::*;
pub use actor::*;
pub use item::*;
pub use key::ConfigKey;
pub use spell::*;
pub use table::{LabelTable, Table};
pub use types::*;
pub use units::*;
