pub mod aggregator;
pub mod filter;
pub mod rollup;
pub mod service;
