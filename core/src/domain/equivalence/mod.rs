pub mod calculator;
pub mod entities;
pub mod groups;
pub mod ports;
pub mod services;

pub use calculator::compute_equivalences;
pub use entities::*;
pub use groups::{SubstitutionGroup, SubstitutionGroups};
pub use ports::*;
