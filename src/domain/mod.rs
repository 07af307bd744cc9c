pub mod allocator;
pub mod classifier;
pub mod incident;
pub mod matcher;
pub mod network;
pub mod resource;
pub mod triage;
pub mod utils;
