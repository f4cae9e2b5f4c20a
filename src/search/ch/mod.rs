pub mod contraction;
pub mod query;
