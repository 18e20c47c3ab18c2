pub mod dataset;
pub mod prefetch;
