// Tue Jan 24 2026 - Alex

pub mod aggregator;

pub use aggregator::ConstantAggregator;
