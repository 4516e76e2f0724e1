pub mod fitting;
pub mod query;
