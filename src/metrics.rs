//! Metrics collection and export for object pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Metrics data for a pool
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
/// let metrics = manager.get_pool("shirts").unwrap().get_metrics();
/// assert_eq!(metrics.total_inserted, 1);
/// assert_eq!(metrics.members, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoolMetrics {
    /// Type the pool is bound to
    pub type_name: &'static str,

    /// Total objects inserted
    pub total_inserted: usize,

    /// Total objects removed
    pub total_removed: usize,

    /// Total successful random selections
    pub total_sampled: usize,

    /// Inserts refused because of a type mismatch or a full pool
    pub rejected_inserts: usize,

    /// Random selections attempted on an empty pool
    pub empty_samples: usize,

    /// Current number of objects in the pool
    pub members: usize,

    /// Pool utilization ratio (0.0 to 1.0)
    pub utilization: f64,

    /// Maximum pool capacity
    pub max_capacity: usize,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("type_name".to_string(), self.type_name.to_string());
        metrics.insert("total_inserted".to_string(), self.total_inserted.to_string());
        metrics.insert("total_removed".to_string(), self.total_removed.to_string());
        metrics.insert("total_sampled".to_string(), self.total_sampled.to_string());
        metrics.insert("rejected_inserts".to_string(), self.rejected_inserts.to_string());
        metrics.insert("empty_samples".to_string(), self.empty_samples.to_string());
        metrics.insert("members".to_string(), self.members.to_string());
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics.insert("max_capacity".to_string(), self.max_capacity.to_string());
        metrics
    }
}

/// Metrics exporter for Prometheus format
#[cfg(feature = "metrics")]
pub struct MetricsExporter;

#[cfg(feature = "metrics")]
impl MetricsExporter {
    /// Export metrics of several pools in Prometheus exposition format.
    ///
    /// Every series is labelled with `pool` and `type`; `tags` are added to
    /// all series as constant labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use esox_randompool::{MetricsExporter, PoolConfiguration, PoolManager};
    /// use std::collections::HashMap;
    ///
    /// let manager = PoolManager::with_builtin_types(&PoolConfiguration::default()).unwrap();
    /// manager.create_pool("socks", "sock").unwrap();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "api".to_string());
    ///
    /// let output = MetricsExporter::export_prometheus(&manager.metrics(), Some(&tags)).unwrap();
    /// assert!(output.contains("randompool_objects"));
    /// assert!(output.contains("service=\"api\""));
    /// ```
    pub fn export_prometheus(
        pools: &[(String, PoolMetrics)],
        tags: Option<&HashMap<String, String>>,
    ) -> prometheus::Result<String> {
        use prometheus::{Encoder, GaugeVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

        let registry = Registry::new_custom(None, tags.cloned())?;
        let labels = &["pool", "type"];

        let members = IntGaugeVec::new(
            Opts::new("randompool_objects", "Current objects in the pool"),
            labels,
        )?;
        let capacity = IntGaugeVec::new(
            Opts::new("randompool_capacity", "Maximum objects the pool may hold"),
            labels,
        )?;
        let utilization = GaugeVec::new(
            Opts::new("randompool_utilization", "Pool utilization ratio"),
            labels,
        )?;
        let inserted = IntCounterVec::new(
            Opts::new("randompool_objects_inserted_total", "Total objects inserted"),
            labels,
        )?;
        let removed = IntCounterVec::new(
            Opts::new("randompool_objects_removed_total", "Total objects removed"),
            labels,
        )?;
        let sampled = IntCounterVec::new(
            Opts::new("randompool_objects_sampled_total", "Total random selections"),
            labels,
        )?;
        let rejected = IntCounterVec::new(
            Opts::new("randompool_inserts_rejected_total", "Inserts refused by the pool"),
            labels,
        )?;
        let empty = IntCounterVec::new(
            Opts::new("randompool_events_empty_total", "Random selections on an empty pool"),
            labels,
        )?;

        registry.register(Box::new(members.clone()))?;
        registry.register(Box::new(capacity.clone()))?;
        registry.register(Box::new(utilization.clone()))?;
        registry.register(Box::new(inserted.clone()))?;
        registry.register(Box::new(removed.clone()))?;
        registry.register(Box::new(sampled.clone()))?;
        registry.register(Box::new(rejected.clone()))?;
        registry.register(Box::new(empty.clone()))?;

        for (name, metrics) in pools {
            let values = [name.as_str(), metrics.type_name];
            members.with_label_values(&values).set(saturating_i64(metrics.members));
            capacity.with_label_values(&values).set(saturating_i64(metrics.max_capacity));
            utilization.with_label_values(&values).set(metrics.utilization);
            inserted.with_label_values(&values).inc_by(metrics.total_inserted as u64);
            removed.with_label_values(&values).inc_by(metrics.total_removed as u64);
            sampled.with_label_values(&values).inc_by(metrics.total_sampled as u64);
            rejected.with_label_values(&values).inc_by(metrics.rejected_inserts as u64);
            empty.with_label_values(&values).inc_by(metrics.empty_samples as u64);
        }

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(feature = "metrics")]
fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Internal metrics tracker
///
/// Counters are atomic so that read-locked operations (sampling) can bump
/// them too.
#[derive(Debug, Default)]
pub(crate) struct MetricsTracker {
    pub total_inserted: AtomicUsize,
    pub total_removed: AtomicUsize,
    pub total_sampled: AtomicUsize,
    pub rejected_inserts: AtomicUsize,
    pub empty_samples: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_metrics(&self, type_name: &'static str, members: usize, capacity: usize) -> PoolMetrics {
        PoolMetrics {
            type_name,
            total_inserted: self.total_inserted.load(Ordering::Relaxed),
            total_removed: self.total_removed.load(Ordering::Relaxed),
            total_sampled: self.total_sampled.load(Ordering::Relaxed),
            rejected_inserts: self.rejected_inserts.load(Ordering::Relaxed),
            empty_samples: self.empty_samples.load(Ordering::Relaxed),
            members,
            utilization: utilization(members, capacity),
            max_capacity: capacity,
        }
    }
}

pub(crate) fn utilization(members: usize, capacity: usize) -> f64 {
    if capacity > 0 {
        members as f64 / capacity as f64
    } else {
        0.0
    }
}
