pub use crate::ds::{AccessCounts, ShardSelector};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::map::ForgettingMap;
pub use crate::metrics::MapMetricsSnapshot;
pub use crate::store::RecencyStore;
pub use crate::traits::{AccessOrdered, CoreMap, FrequencyTracked};
