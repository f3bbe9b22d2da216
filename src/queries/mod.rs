pub mod guest_queries;
pub mod stats_queries;
