pub mod affiliation;
pub mod dataset;
pub mod error;
pub mod export;
pub mod normalize;
pub mod predict;
pub mod rankings;
pub mod rolling;
pub mod snapshot;
