//! Service configuration.

use serde::{Deserialize, Serialize};

use proxima_index::DistanceMetric;

/// Configuration options for building an [`IndexService`](crate::IndexService).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Fixed vector dimension. `None` leaves the dimension unset until
    /// the first accepted record fixes it permanently.
    pub dimension: Option<usize>,
    /// Distance metric used for search.
    pub metric: DistanceMetric,
}

impl IndexConfig {
    /// Create the default configuration: dimension fixed by the first
    /// accepted record, squared Euclidean distance.
    #[must_use]
    pub const fn new() -> Self {
        Self { dimension: None, metric: DistanceMetric::SquaredEuclidean }
    }

    /// Fix the dimension up front instead of on first insert.
    #[must_use]
    pub const fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Set the distance metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Configuration options for building a
/// [`ShardedIndexService`](crate::ShardedIndexService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardedConfig {
    /// Number of shards. The order of shards is the order in which they
    /// fill with inserted vectors.
    pub shards: usize,
    /// Maximum number of records each shard accepts.
    pub shard_capacity: usize,
    /// Fixed vector dimension, or `None` to fix it on first insert.
    pub dimension: Option<usize>,
    /// Distance metric used for search, shared by every shard.
    pub metric: DistanceMetric,
}

impl ShardedConfig {
    /// Create a sharded configuration with the given shard count and
    /// per-shard capacity.
    #[must_use]
    pub const fn new(shards: usize, shard_capacity: usize) -> Self {
        Self { shards, shard_capacity, dimension: None, metric: DistanceMetric::SquaredEuclidean }
    }

    /// Fix the dimension up front instead of on first insert.
    #[must_use]
    pub const fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Set the distance metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unset_squared_euclidean() {
        let config = IndexConfig::new();
        assert_eq!(config.dimension, None);
        assert_eq!(config.metric, DistanceMetric::SquaredEuclidean);
        assert_eq!(config, IndexConfig::default());
    }

    #[test]
    fn builder_setters() {
        let config = IndexConfig::new().with_dimension(128).with_metric(DistanceMetric::Cosine);
        assert_eq!(config.dimension, Some(128));
        assert_eq!(config.metric, DistanceMetric::Cosine);
    }

    #[test]
    fn sharded_builder_setters() {
        let config = ShardedConfig::new(4, 1000).with_dimension(3);
        assert_eq!(config.shards, 4);
        assert_eq!(config.shard_capacity, 1000);
        assert_eq!(config.dimension, Some(3));
    }
}
