pub mod aggregator;
pub mod chains;
pub mod swap;
