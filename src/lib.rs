//! # EsoxSolutions.RandomPool
//!
//! Thread-safe registry of typed object pools with uniform random
//! selection, exposed as an HTTP service.
//!
//! ## Features
//!
//! - Named pools bound to one registered object type each
//! - Structural type checks on every insert and removal
//! - Shared, configurable capacity for all pools (`MAX_POOL_SIZE`)
//! - Uniformly random retrieval of pool members
//! - Per-pool health monitoring and metrics
//! - Prometheus metrics export
//! - HTTP front end built on axum
//!
//! ## Quick Start
//!
//! ```rust
//! use esox_randompool::{Object, PoolConfiguration, PoolManager, Shirt};
//!
//! let manager = PoolManager::with_builtin_types(&PoolConfiguration::default()).unwrap();
//! manager.create_pool("shirt", "shirt").unwrap();
//! manager.add_object("shirt", Object::from(Shirt::new("M", "blue"))).unwrap();
//! manager.add_object("shirt", Object::from(Shirt::new("L", "red"))).unwrap();
//!
//! let picked = manager.random_object("shirt").unwrap();
//! println!("Got: {:?}", picked);
//! ```

mod config;
mod errors;
mod health;
mod manager;
mod metrics;
mod object;
mod pool;
mod types;

pub mod service;

pub use config::{
    BIND_ADDRESS_ENV, DEFAULT_MAX_POOL_SIZE, MAX_POOL_SIZE_ENV, PoolConfiguration,
};
pub use errors::{ConfigError, ErrorKind, PoolError, PoolResult};
pub use health::{HealthReport, HealthStatus};
pub use manager::{PoolHandle, PoolManager};
#[cfg(feature = "metrics")]
pub use metrics::MetricsExporter;
pub use metrics::PoolMetrics;
pub use object::{FieldValue, Object, Pants, PoolObject, Shirt, Sock};
pub use pool::RandomObjectPool;
pub use types::{FieldKind, FieldSchema, Schema, TypeDescriptor, TypeRegistry};
