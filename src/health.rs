//! Health monitoring for object pools

use crate::metrics::utilization;

use serde::Serialize;
use std::collections::BTreeMap;

const HIGH_UTILIZATION: f64 = 0.9;

/// Health status of a single pool
///
/// # Examples
///
/// ```
/// use esox_randompool::{PoolConfiguration, PoolManager};
///
/// let manager = PoolManager::with_builtin_types(&PoolConfiguration::default()).unwrap();
/// manager.create_pool("socks", "sock").unwrap();
///
/// let health = manager.get_pool("socks").unwrap().get_health_status();
/// assert!(health.is_healthy());
/// assert_eq!(health.warnings, vec!["Pool is empty".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    /// Type the pool is bound to
    pub type_name: &'static str,

    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Current pool utilization (0.0 to 1.0)
    pub utilization: f64,

    /// Objects currently held
    pub members: usize,

    /// Total capacity
    pub total_capacity: usize,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Create a new health status
    pub fn new(type_name: &'static str, members: usize, capacity: usize) -> Self {
        let utilization = utilization(members, capacity);

        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if utilization > HIGH_UTILIZATION {
            warnings.push(format!("High utilization: {:.1}%", utilization * 100.0));
            is_healthy = false;
        }

        // Sampling will fail until something is inserted
        if members == 0 {
            warnings.push("Pool is empty".to_string());
        }

        Self {
            type_name,
            is_healthy,
            utilization,
            members,
            total_capacity: capacity,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}

/// Health of every pool a manager owns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    /// True when every pool is healthy
    pub healthy: bool,

    /// Per-pool status keyed by pool name
    pub pools: BTreeMap<String, HealthStatus>,
}

impl HealthReport {
    pub fn new(pools: BTreeMap<String, HealthStatus>) -> Self {
        Self {
            healthy: pools.values().all(HealthStatus::is_healthy),
            pools,
        }
    }
}
