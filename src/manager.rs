//! Registry of named pools

use crate::config::PoolConfiguration;
use crate::errors::{ConfigError, PoolError, PoolResult};
use crate::health::{HealthReport, HealthStatus};
use crate::metrics::PoolMetrics;
use crate::object::{Object, PoolObject};
use crate::pool::RandomObjectPool;
use crate::types::{TypeDescriptor, TypeRegistry};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Shared, lock-guarded access to one pool owned by a [`PoolManager`].
///
/// Inserts and removals take the write lock; sampling and type checks take
/// the read lock, so concurrent samples never wait on each other.
#[derive(Debug, Clone)]
pub struct PoolHandle {
    name: Arc<str>,
    inner: Arc<RwLock<RandomObjectPool<Object>>>,
}

impl PoolHandle {
    fn new(name: &str, pool: RandomObjectPool<Object>) -> Self {
        Self {
            name: Arc::from(name),
            inner: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validate_and_check_type(&self, obj: &Object) -> PoolResult<()> {
        self.inner.read().validate_and_check_type(obj)
    }

    pub fn insert(&self, obj: Object) -> PoolResult<()> {
        self.inner.write().insert(obj)
    }

    pub fn remove(&self, obj: &Object) -> PoolResult<()> {
        self.inner.write().remove(obj)
    }

    /// Copy of a uniformly chosen member
    pub fn sample_random(&self) -> PoolResult<Object> {
        self.inner.read().sample_random().cloned()
    }

    pub fn contains(&self, obj: &Object) -> bool {
        self.inner.read().contains(obj)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn expected_type(&self) -> TypeDescriptor {
        self.inner.read().expected_type()
    }

    pub fn get_metrics(&self) -> PoolMetrics {
        self.inner.read().get_metrics()
    }

    pub fn get_health_status(&self) -> HealthStatus {
        self.inner.read().get_health_status()
    }
}

/// Owns every pool of the process, keyed by name.
///
/// Pools are created once and never dropped while the manager lives. All
/// pools share the capacity the manager was configured with.
///
/// # Examples
///
/// ```
/// use esox_randompool::{Object, PoolConfiguration, PoolManager, Shirt};
///
/// let manager = PoolManager::with_builtin_types(&PoolConfiguration::default()).unwrap();
/// manager.create_pool("shirts", "shirt").unwrap();
/// manager.add_object("shirts", Object::from(Shirt::new("M", "blue"))).unwrap();
///
/// let picked = manager.random_object("shirts").unwrap();
/// assert_eq!(picked, Object::from(Shirt::new("M", "blue")));
/// ```
#[derive(Debug)]
pub struct PoolManager {
    types: TypeRegistry,
    pools: DashMap<String, PoolHandle>,
    max_pool_size: NonZeroUsize,
}

impl PoolManager {
    /// Create a manager resolving types through `types`
    pub fn new(types: TypeRegistry, config: &PoolConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        let max_pool_size =
            NonZeroUsize::new(config.max_pool_size).ok_or(ConfigError::ZeroCapacity)?;

        Ok(Self {
            types,
            pools: DashMap::new(),
            max_pool_size,
        })
    }

    /// Create a manager over [`TypeRegistry::with_builtin_types`]
    pub fn with_builtin_types(config: &PoolConfiguration) -> Result<Self, ConfigError> {
        Self::new(TypeRegistry::with_builtin_types(), config)
    }

    /// Create an empty pool called `name` for the registered type `type_name`.
    ///
    /// An existing name is reported before an unknown type, and a failed
    /// creation leaves no entry behind.
    pub fn create_pool(&self, name: &str, type_name: &str) -> PoolResult<()> {
        match self.pools.entry(name.to_string()) {
            Entry::Occupied(_) => Err(PoolError::AlreadyExists(name.to_string())),
            Entry::Vacant(slot) => {
                let descriptor = self.types.lookup(type_name)?;
                slot.insert(PoolHandle::new(
                    name,
                    RandomObjectPool::new(descriptor, self.max_pool_size),
                ));

                tracing::info!(
                    pool = name,
                    type_name,
                    capacity = self.max_pool_size.get(),
                    "Created pool"
                );
                Ok(())
            }
        }
    }

    /// Look up a pool by name
    pub fn get_pool(&self, name: &str) -> PoolResult<PoolHandle> {
        self.pools
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| PoolError::PoolNotFound(name.to_string()))
    }

    /// Insert `obj` into the pool called `pool_name`
    pub fn add_object(&self, pool_name: &str, obj: Object) -> PoolResult<()> {
        let pool = self.get_pool(pool_name)?;
        Self::check_pool_type(&pool, &obj)?;
        pool.insert(obj)?;

        tracing::debug!(pool = pool_name, members = pool.len(), "Added object");
        Ok(())
    }

    /// Remove one object equal to `obj` from the pool called `pool_name`
    pub fn remove_object(&self, pool_name: &str, obj: &Object) -> PoolResult<()> {
        let pool = self.get_pool(pool_name)?;
        Self::check_pool_type(&pool, obj)?;
        pool.remove(obj)?;

        tracing::debug!(pool = pool_name, members = pool.len(), "Removed object");
        Ok(())
    }

    /// Uniformly random member of the pool called `pool_name`
    pub fn random_object(&self, pool_name: &str) -> PoolResult<Object> {
        self.get_pool(pool_name)?.sample_random()
    }

    /// Names of all pools, sorted
    pub fn pool_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.pools.iter().map(|entry| entry.key().clone()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Capacity every pool is created with
    pub fn max_pool_size(&self) -> usize {
        self.max_pool_size.get()
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Health of every pool
    pub fn health_report(&self) -> HealthReport {
        let pools: BTreeMap<_, _> = self
            .handles()
            .into_iter()
            .map(|pool| (pool.name().to_string(), pool.get_health_status()))
            .collect();
        HealthReport::new(pools)
    }

    /// Metrics of every pool, sorted by pool name
    pub fn metrics(&self) -> Vec<(String, PoolMetrics)> {
        let mut metrics: Vec<_> = self
            .handles()
            .into_iter()
            .map(|pool| (pool.name().to_string(), pool.get_metrics()))
            .collect();
        metrics.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        metrics
    }

    // Clones the handles out so no map shard stays locked while pool locks are taken.
    fn handles(&self) -> Vec<PoolHandle> {
        self.pools.iter().map(|entry| entry.value().clone()).collect()
    }

    fn check_pool_type(pool: &PoolHandle, obj: &Object) -> PoolResult<()> {
        pool.validate_and_check_type(obj)
            .map_err(|_| PoolError::PoolTypeMismatch {
                pool: pool.name().to_string(),
                expected: pool.expected_type().name().to_string(),
                found: obj.type_name().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::object::{Pants, Shirt, Sock};

    fn manager() -> PoolManager {
        PoolManager::with_builtin_types(&PoolConfiguration::default()).unwrap()
    }

    #[test]
    fn test_create_and_get_pool() {
        let manager = manager();
        manager.create_pool("shirts", "shirt").unwrap();

        let pool = manager.get_pool("shirts").unwrap();
        assert_eq!(pool.name(), "shirts");
        assert_eq!(pool.expected_type().name(), "shirt");
        assert_eq!(pool.capacity(), 536_870_912);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected_first_pool_kept() {
        let manager = manager();
        manager.create_pool("shirts", "shirt").unwrap();
        manager
            .add_object("shirts", Object::from(Shirt::new("M", "blue")))
            .unwrap();

        let err = manager.create_pool("shirts", "sock").unwrap_err();
        assert_eq!(err, PoolError::AlreadyExists("shirts".to_string()));

        let pool = manager.get_pool("shirts").unwrap();
        assert_eq!(pool.expected_type().name(), "shirt");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_existing_name_reported_before_unknown_type() {
        let manager = manager();
        manager.create_pool("shirts", "shirt").unwrap();

        let err = manager.create_pool("shirts", "hat").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_unknown_type_creates_nothing() {
        let manager = manager();

        let err = manager.create_pool("hats", "hat").unwrap_err();
        assert_eq!(err, PoolError::UnknownType("hat".to_string()));
        assert!(manager.is_empty());
        assert!(manager.get_pool("hats").is_err());
    }

    #[test]
    fn test_operations_on_missing_pool() {
        let manager = manager();
        let sock = Object::from(Sock::new("S", "green"));

        let missing = PoolError::PoolNotFound("socks".to_string());
        assert_eq!(manager.add_object("socks", sock.clone()), Err(missing.clone()));
        assert_eq!(manager.remove_object("socks", &sock), Err(missing.clone()));
        assert_eq!(manager.random_object("socks"), Err(missing));
    }

    #[test]
    fn test_caller_type_check_rejects_early() {
        let manager = manager();
        manager.create_pool("shirts", "shirt").unwrap();

        let pants = Object::from(Pants::new("L", "black"));
        let err = manager.add_object("shirts", pants.clone()).unwrap_err();
        assert_eq!(
            err,
            PoolError::PoolTypeMismatch {
                pool: "shirts".to_string(),
                expected: "shirt".to_string(),
                found: "pants".to_string(),
            }
        );
        assert_eq!(manager.remove_object("shirts", &pants).unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert!(manager.get_pool("shirts").unwrap().is_empty());
        // The early check runs before the pool so its rejection counter is untouched.
        assert_eq!(manager.get_pool("shirts").unwrap().get_metrics().rejected_inserts, 0);
    }

    #[test]
    fn test_capacity_is_shared_by_all_pools() {
        let config = PoolConfiguration::new().with_max_pool_size(1);
        let manager = PoolManager::with_builtin_types(&config).unwrap();
        manager.create_pool("shirts", "shirt").unwrap();
        manager.create_pool("socks", "sock").unwrap();

        manager.add_object("shirts", Object::from(Shirt::new("M", "blue"))).unwrap();
        manager.add_object("socks", Object::from(Sock::new("M", "blue"))).unwrap();
        assert_eq!(
            manager.add_object("shirts", Object::from(Shirt::new("S", "green"))),
            Err(PoolError::CapacityExceeded(1))
        );
        assert_eq!(manager.max_pool_size(), 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = PoolConfiguration::new().with_max_pool_size(0);
        assert_eq!(
            PoolManager::with_builtin_types(&config).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }

    #[test]
    fn test_reports_cover_every_pool() {
        let manager = manager();
        manager.create_pool("socks", "sock").unwrap();
        manager.create_pool("pants", "pants").unwrap();

        assert_eq!(manager.pool_names(), vec!["pants".to_string(), "socks".to_string()]);

        let report = manager.health_report();
        assert!(report.healthy);
        assert_eq!(report.pools.len(), 2);
        assert_eq!(report.pools["socks"].type_name, "sock");

        let metrics = manager.metrics();
        assert_eq!(metrics[0].0, "pants");
        assert_eq!(metrics[1].1.type_name, "sock");
    }
}
