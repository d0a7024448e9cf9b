pub mod engine;
pub mod quals;
pub mod tables;
pub mod types;
pub mod validation;

pub use engine::{aggregate, normalize_team_key, ScoringError};
pub use quals::quals_points;
pub use tables::*;
pub use types::*;
pub use validation::validate_tables;
