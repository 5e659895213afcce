//! Sharded index service.
//!
//! [`ShardedIndexService`] routes the four index operations across a row
//! of fixed-capacity shards. New records fill the first shard to
//! capacity, then the second, and so on; a record's shard assignment is
//! permanent, so upserts of an existing id always land on its home
//! shard. Search fans out to every shard and merges the per-shard
//! results into one globally-ordered top-k.

mod routing;

pub use routing::greedy_fill;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info};

use proxima_core::{Neighbor, VectorId};
use proxima_index::store::BatchOutcome;
use proxima_index::{IndexError, VectorRecord};

use crate::config::{IndexConfig, ShardedConfig};
use crate::error::Error;
use crate::service::{IndexDescription, IndexService};

/// A vector index service routing over fixed-capacity shards.
///
/// All mutations must go through this router; it owns its shards and the
/// id-to-shard assignment map. One router-level insertion lock serializes
/// mutations so a batch is validated in full (dimension, duplicates,
/// capacity) before anything is applied — a failed batch leaves every
/// shard untouched.
///
/// # Example
///
/// ```
/// use proxima::{ShardedConfig, ShardedIndexService, VectorRecord};
///
/// let service = ShardedIndexService::new(ShardedConfig::new(3, 2)).unwrap();
///
/// let batch: Vec<VectorRecord> = (1..=5)
///     .map(|id| VectorRecord::new(id, vec![id as f32]).unwrap())
///     .collect();
/// service.insert(batch).unwrap();
///
/// assert_eq!(service.describe().unwrap().record_count, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ShardedIndexService {
    inner: Arc<ShardedInner>,
}

#[derive(Debug)]
struct ShardedInner {
    shards: Vec<IndexService>,
    /// Which shard each stored id lives on. An assignment never changes
    /// once made.
    assignments: RwLock<HashMap<VectorId, usize>>,
    /// Serializes insert/upsert batches across shards.
    insertion_lock: Mutex<()>,
    config: ShardedConfig,
}

impl ShardedIndexService {
    /// Create a new service with empty shards.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration has zero shards, zero
    /// per-shard capacity, or a zero fixed dimension.
    pub fn new(config: ShardedConfig) -> Result<Self, Error> {
        if config.shards == 0 {
            return Err(Error::Config("shard count must be positive".to_string()));
        }
        if config.shard_capacity == 0 {
            return Err(Error::Config("shard capacity must be positive".to_string()));
        }

        let shard_config = IndexConfig {
            dimension: config.dimension,
            metric: config.metric,
        };
        let shards = (0..config.shards)
            .map(|_| IndexService::new(shard_config))
            .collect::<Result<Vec<_>, _>>()?;

        info!(shards = config.shards, capacity = config.shard_capacity, "registered shards");

        Ok(Self {
            inner: Arc::new(ShardedInner {
                shards,
                assignments: RwLock::new(HashMap::new()),
                insertion_lock: Mutex::new(()),
                config,
            }),
        })
    }

    /// Get the service configuration.
    #[must_use]
    pub fn config(&self) -> &ShardedConfig {
        &self.inner.config
    }

    /// Describe the whole index: total record count across shards and
    /// the fixed dimension.
    ///
    /// # Errors
    ///
    /// Returns an error only if a prior panic corrupted a shard.
    pub fn describe(&self) -> Result<IndexDescription, Error> {
        info!("received describe request");

        let mut record_count = 0;
        let mut dimension = self.inner.config.dimension;

        for (shard, service) in self.inner.shards.iter().enumerate() {
            let description = service.description()?;
            record_count += description.record_count;
            if dimension.is_none() {
                dimension = description.dimension;
            }
            debug!(shard, records = description.record_count, "described shard");
        }

        Ok(IndexDescription { record_count, dimension })
    }

    /// Search for the k nearest neighbors across all shards.
    ///
    /// Each shard returns its own top-k; the router merges them by
    /// `(distance, id)` ascending and truncates to k, preserving the
    /// single-index ordering contract.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`IndexService::search`].
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, Error> {
        info!(k, "received search request");

        let mut merged: Vec<Neighbor> = Vec::new();
        for (shard, service) in self.inner.shards.iter().enumerate() {
            let hits = service.search(query, k)?;
            debug!(shard, results = hits.len(), "searched shard");
            merged.extend(hits);
        }

        merged.sort_by(Neighbor::distance_then_id);
        merged.truncate(k);
        Ok(merged)
    }

    /// Insert a batch of new vectors, filling shards greedily.
    ///
    /// The batch is validated in full before any shard is touched:
    /// dimension consistency, duplicate ids (against the index and within
    /// the batch), and total free capacity. A failed batch applies
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DuplicateId`] or
    /// [`IndexError::DimensionMismatch`] on validation failure, and
    /// [`Error::InsufficientCapacity`] when the batch does not fit in the
    /// remaining free slots.
    pub fn insert(&self, records: Vec<VectorRecord>) -> Result<BatchOutcome, Error> {
        let _guard = self.inner.insertion_lock.lock().map_err(|_| IndexError::LockPoisoned)?;

        info!(num_vectors = records.len(), "received insert request");
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }

        self.validate_batch_dimensions(&records)?;

        // Reject any id already stored or repeated within the batch.
        {
            let assignments =
                self.inner.assignments.read().map_err(|_| IndexError::LockPoisoned)?;
            let mut batch_ids: HashSet<VectorId> = HashSet::with_capacity(records.len());
            for record in &records {
                let id = record.id();
                if assignments.contains_key(&id) || !batch_ids.insert(id) {
                    return Err(IndexError::DuplicateId(id).into());
                }
            }
        }

        let sizes = self.shard_sizes()?;
        let (unallocated, shard_fills) =
            greedy_fill(records.len(), self.inner.config.shard_capacity, &sizes);
        if unallocated > 0 {
            info!(unallocated, "insufficient capacity to insert all new vectors across shards");
            return Err(Error::InsufficientCapacity {
                requested: records.len(),
                available: records.len() - unallocated,
            });
        }

        let mut remaining = records.into_iter();
        let mut total = BatchOutcome::default();
        let mut placed: Vec<(VectorId, usize)> = Vec::new();

        for (shard, fill) in shard_fills {
            let chunk: Vec<VectorRecord> = remaining.by_ref().take(fill).collect();
            let ids: Vec<VectorId> = chunk.iter().map(VectorRecord::id).collect();

            let outcome = self.inner.shards[shard].insert(chunk)?;
            total.inserted += outcome.inserted;
            placed.extend(ids.into_iter().map(|id| (id, shard)));

            info!(shard, inserted = outcome.inserted, "inserted vectors into shard");
        }

        let mut assignments =
            self.inner.assignments.write().map_err(|_| IndexError::LockPoisoned)?;
        assignments.extend(placed);

        Ok(total)
    }

    /// Insert or replace a batch of vectors.
    ///
    /// Records whose id already has a shard assignment are upserted on
    /// their home shard; the rest are treated as new and greedy-filled
    /// like an insert. An id repeated within one batch applies
    /// last-writer-wins and counts once.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] on validation failure,
    /// and [`Error::InsufficientCapacity`] when the new records do not
    /// fit in the remaining free slots.
    pub fn upsert(&self, records: Vec<VectorRecord>) -> Result<BatchOutcome, Error> {
        let _guard = self.inner.insertion_lock.lock().map_err(|_| IndexError::LockPoisoned)?;

        info!(num_vectors = records.len(), "received upsert request");
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }

        self.validate_batch_dimensions(&records)?;

        // Last writer wins for ids repeated within the batch.
        let records = dedupe_last_writer(records);

        // Split the batch into per-shard updates and unassigned records.
        let mut shard_updates: HashMap<usize, Vec<VectorRecord>> = HashMap::new();
        let mut new_records: Vec<VectorRecord> = Vec::new();
        {
            let assignments =
                self.inner.assignments.read().map_err(|_| IndexError::LockPoisoned)?;
            for record in records {
                match assignments.get(&record.id()) {
                    Some(&shard) => shard_updates.entry(shard).or_default().push(record),
                    None => new_records.push(record),
                }
            }
        }

        info!(num_new = new_records.len(), "identified new vectors to insert");

        let sizes = self.shard_sizes()?;
        let (unallocated, shard_fills) =
            greedy_fill(new_records.len(), self.inner.config.shard_capacity, &sizes);
        if unallocated > 0 {
            info!(unallocated, "insufficient capacity to insert all new vectors across shards");
            return Err(Error::InsufficientCapacity {
                requested: new_records.len(),
                available: new_records.len() - unallocated,
            });
        }

        let mut total = BatchOutcome::default();

        // Overwrite existing records on their home shards.
        for (shard, chunk) in shard_updates {
            let outcome = self.inner.shards[shard].upsert(chunk)?;
            total.replaced += outcome.replaced;
            info!(shard, replaced = outcome.replaced, "upserted vectors into shard");
        }

        // Place new records exactly like an insert.
        let mut remaining = new_records.into_iter();
        let mut placed: Vec<(VectorId, usize)> = Vec::new();
        for (shard, fill) in shard_fills {
            let chunk: Vec<VectorRecord> = remaining.by_ref().take(fill).collect();
            let ids: Vec<VectorId> = chunk.iter().map(VectorRecord::id).collect();

            let outcome = self.inner.shards[shard].upsert(chunk)?;
            total.inserted += outcome.inserted;
            placed.extend(ids.into_iter().map(|id| (id, shard)));

            info!(shard, inserted = outcome.inserted, "inserted vectors into shard");
        }

        let mut assignments =
            self.inner.assignments.write().map_err(|_| IndexError::LockPoisoned)?;
        assignments.extend(placed);

        Ok(total)
    }

    /// Validate that every record in a batch matches the index's
    /// dimension, or fixes a consistent one if nothing has yet.
    fn validate_batch_dimensions(&self, records: &[VectorRecord]) -> Result<(), Error> {
        let mut dimension = self.dimension()?;

        for record in records {
            let actual = record.dimension();
            match dimension {
                Some(expected) if actual != expected => {
                    return Err(IndexError::DimensionMismatch { expected, actual }.into());
                }
                Some(_) => {}
                None => dimension = Some(actual),
            }
        }

        Ok(())
    }

    /// The index's fixed dimension: configured, or fixed by whichever
    /// shard accepted the first record.
    fn dimension(&self) -> Result<Option<usize>, Error> {
        if let Some(dimension) = self.inner.config.dimension {
            return Ok(Some(dimension));
        }
        for shard in &self.inner.shards {
            if let Some(dimension) = shard.description()?.dimension {
                return Ok(Some(dimension));
            }
        }
        Ok(None)
    }

    /// Current record count of each shard, in shard order.
    fn shard_sizes(&self) -> Result<Vec<usize>, Error> {
        self.inner
            .shards
            .iter()
            .map(|shard| Ok(shard.description()?.record_count))
            .collect()
    }
}

/// Keep only the last occurrence of each id, preserving first-seen order.
fn dedupe_last_writer(records: Vec<VectorRecord>) -> Vec<VectorRecord> {
    let mut positions: HashMap<VectorId, usize> = HashMap::with_capacity(records.len());
    let mut deduped: Vec<VectorRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(&record.id()) {
            Some(&position) => deduped[position] = record,
            None => {
                positions.insert(record.id(), deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, values: &[f32]) -> VectorRecord {
        VectorRecord::new(id, values.to_vec()).unwrap()
    }

    #[test]
    fn zero_shards_is_invalid() {
        assert!(matches!(
            ShardedIndexService::new(ShardedConfig::new(0, 10)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn zero_capacity_is_invalid() {
        assert!(matches!(
            ShardedIndexService::new(ShardedConfig::new(3, 0)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn dedupe_keeps_last_value_in_first_seen_order() {
        let records = vec![
            record(1, &[1.0]),
            record(2, &[2.0]),
            record(1, &[9.0]),
        ];
        let deduped = dedupe_last_writer(records);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id(), VectorId::new(1));
        assert_eq!(deduped[0].vector().as_slice(), &[9.0]);
        assert_eq!(deduped[1].id(), VectorId::new(2));
    }
}
