//! Bounded random-selection object pool

use crate::errors::{PoolError, PoolResult};
use crate::health::HealthStatus;
use crate::metrics::{MetricsTracker, PoolMetrics};
use crate::object::PoolObject;
use crate::types::TypeDescriptor;

use rand::Rng;
use rand::seq::IndexedRandom;
use std::num::NonZeroUsize;

/// A bounded multiset of objects of one registered type, from which members
/// can be drawn uniformly at random.
///
/// Members are kept in insertion order. Order only matters for
/// [`RandomObjectPool::remove`], which drops the first structurally-equal
/// member.
///
/// # Examples
///
/// ```
/// use esox_randompool::{RandomObjectPool, Shirt, TypeDescriptor};
/// use std::num::NonZeroUsize;
///
/// let mut pool = RandomObjectPool::new(TypeDescriptor::of::<Shirt>(), NonZeroUsize::new(10).unwrap());
/// pool.insert(Shirt::new("M", "blue")).unwrap();
///
/// assert_eq!(pool.sample_random().unwrap(), &Shirt::new("M", "blue"));
/// ```
#[derive(Debug)]
pub struct RandomObjectPool<T: PoolObject> {
    members: Vec<T>,
    expected_type: TypeDescriptor,
    capacity: NonZeroUsize,
    metrics: MetricsTracker,
}

impl<T: PoolObject> RandomObjectPool<T> {
    /// Create an empty pool bound to `expected_type`
    pub fn new(expected_type: TypeDescriptor, capacity: NonZeroUsize) -> Self {
        Self {
            members: Vec::new(),
            expected_type,
            capacity,
            metrics: MetricsTracker::new(),
        }
    }

    /// Check that `obj` structurally matches the pool's type
    pub fn validate_and_check_type(&self, obj: &T) -> PoolResult<()> {
        if obj.conforms_to(&self.expected_type) {
            Ok(())
        } else {
            Err(PoolError::TypeMismatch {
                expected: self.expected_type.to_string(),
                found: obj.type_name().to_string(),
            })
        }
    }

    /// Add an object.
    ///
    /// The type is checked before the capacity; a rejected insert leaves the
    /// pool unchanged.
    pub fn insert(&mut self, obj: T) -> PoolResult<()> {
        if let Err(e) = self.validate_and_check_type(&obj) {
            MetricsTracker::record(&self.metrics.rejected_inserts);
            return Err(e);
        }

        if self.members.len() >= self.capacity.get() {
            MetricsTracker::record(&self.metrics.rejected_inserts);
            return Err(PoolError::CapacityExceeded(self.capacity.get()));
        }

        self.members.push(obj);
        MetricsTracker::record(&self.metrics.total_inserted);
        Ok(())
    }

    /// Remove one member equal to `obj`, the earliest inserted if there are several
    pub fn remove(&mut self, obj: &T) -> PoolResult<()> {
        let index = self
            .members
            .iter()
            .position(|member| member == obj)
            .ok_or(PoolError::ObjectNotFound)?;

        self.members.remove(index);
        MetricsTracker::record(&self.metrics.total_removed);
        Ok(())
    }

    /// Pick a member uniformly at random using the thread-local generator
    pub fn sample_random(&self) -> PoolResult<&T> {
        self.sample_random_with(&mut rand::rng())
    }

    /// Pick a member uniformly at random using `rng`
    pub fn sample_random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> PoolResult<&T> {
        match self.members.choose(rng) {
            Some(member) => {
                MetricsTracker::record(&self.metrics.total_sampled);
                Ok(member)
            }
            None => {
                MetricsTracker::record(&self.metrics.empty_samples);
                Err(PoolError::EmptyPool)
            }
        }
    }

    pub fn contains(&self, obj: &T) -> bool {
        self.members.contains(obj)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn expected_type(&self) -> TypeDescriptor {
        self.expected_type
    }

    /// Get pool metrics
    pub fn get_metrics(&self) -> PoolMetrics {
        self.metrics
            .get_metrics(self.expected_type.name(), self.len(), self.capacity())
    }

    /// Get health status
    pub fn get_health_status(&self) -> HealthStatus {
        HealthStatus::new(self.expected_type.name(), self.len(), self.capacity())
    }
}
