pub mod analytics;
pub mod asana;
pub mod comparison;
pub mod git;
pub mod query;
pub mod rollup;
