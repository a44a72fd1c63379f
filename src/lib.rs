pub use client::StatsClient;
pub use config::{AggregationConfig, FoldOrder, RatingCategory, RatingWeights};
pub use error::{Result, StatsError};
pub use model::*;
pub use stats::{
    aggregate, aggregate_with, project, project_state, IdentityResolver, MatchLoader,
    MemoryLoader, NumberNameResolver,
};

mod client;
pub mod config;
mod error;
pub mod model;
mod stats;
