pub mod career;
pub mod comparison;
pub mod profile;
pub mod trend;
