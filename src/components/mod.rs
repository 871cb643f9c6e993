pub mod aggregator;
pub mod router;
pub mod tokens;
