mod aggregator;
mod identity;
mod loader;
mod projector;
mod rating;

pub use aggregator::{aggregate, aggregate_with};
pub(crate) use aggregator::{fold_loaded, fold_order};
pub use identity::{IdentityResolver, NumberNameResolver};
pub use loader::{MatchLoader, MemoryLoader};
pub use projector::{project, project_state};
