//! Service configuration options

use crate::errors::ConfigError;

use std::net::SocketAddr;

/// Capacity given to every pool when `MAX_POOL_SIZE` is not set.
///
/// Large enough to be effectively unbounded.
pub const DEFAULT_MAX_POOL_SIZE: usize = 536_870_912;

/// Environment variable holding the capacity shared by all pools
pub const MAX_POOL_SIZE_ENV: &str = "MAX_POOL_SIZE";

/// Environment variable holding the address the HTTP service binds to
pub const BIND_ADDRESS_ENV: &str = "POOL_SERVICE_ADDR";

/// Configuration for the pool service, read once at startup
///
/// # Examples
///
/// ```
/// use esox_randompool::PoolConfiguration;
///
/// let config = PoolConfiguration::new()
///     .with_max_pool_size(100)
///     .with_bind_address(([127, 0, 0, 1], 9000).into());
///
/// assert_eq!(config.max_pool_size, 100);
/// assert_eq!(config.bind_address.port(), 9000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfiguration {
    /// Maximum number of objects any single pool can hold
    pub max_pool_size: usize,

    /// Address the HTTP service listens on
    pub bind_address: SocketAddr,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_POOL_SIZE_ENV) {
            config.max_pool_size = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidMaxPoolSize(raw.clone()))?;
        }

        if let Some(raw) = lookup(BIND_ADDRESS_ENV) {
            config.bind_address = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddress(raw.clone()))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the maximum pool size
    pub fn with_max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Set the bind address
    pub fn with_bind_address(mut self, address: SocketAddr) -> Self {
        self.bind_address = address;
        self
    }

    /// Reject settings no pool could be created with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pool_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
