//! Redis cache client implementation
//!
//! Wraps a multiplexed connection shared by the OTP store and the rate
//! limiter. Connecting retries with exponential backoff at startup only;
//! individual commands are never retried, callers bound them with their own
//! deadline and the configured response timeout.

use redis::{aio::MultiplexedConnection, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Redis client holding one multiplexed connection
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Connect using the URL in `config`
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - No or unparseable URL
    /// * `Err(InfrastructureError::Cache)` - Server unreachable after retries
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Connect with custom startup retry settings
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of connection attempts
    /// * `retry_delay_ms` - Base delay between attempts in milliseconds
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        let url = config
            .redis_url()
            .ok_or_else(|| InfrastructureError::Config("Redis URL is not set".to_string()))?;

        info!("Creating Redis client with URL: {}", mask_url(&url));

        let client = Client::open(url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            max_retries.max(1),
            retry_delay_ms,
            config.connection_timeout(),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        connect_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let outcome =
                tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection())
                    .await
                    .unwrap_or_else(|_| Err(connect_timeout_error(connect_timeout)));

            match outcome {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// A handle to the shared connection
    pub fn get_connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Budget for a single command round-trip
    pub fn response_timeout(&self) -> Duration {
        self.config.response_timeout()
    }

    /// Apply the configured key prefix
    pub fn make_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a single PING bounded by the response timeout.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let mut conn = self.get_connection();
        let mut ping_cmd = redis::cmd("PING");
        let ping = ping_cmd.query_async::<_, String>(&mut conn);
        let result = tokio::time::timeout(self.response_timeout(), ping)
            .await
            .map_err(|_| {
                InfrastructureError::General(format!(
                    "Redis did not answer PING within {}ms",
                    self.response_timeout().as_millis()
                ))
            })?;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }
}

fn connect_timeout_error(timeout: Duration) -> redis::RedisError {
    redis::RedisError::from(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!("connection not established within {}ms", timeout.as_millis()),
    ))
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
