//! Bounded pool of concurrent-check permits.
//!
//! Every inbound check holds one permit for its whole probe sequence. When the
//! pool stays exhausted past the acquisition timeout the caller is turned away
//! instead of queueing without bound.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Why a permit could not be obtained.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermitError {
    /// All permits stayed in use for the whole acquisition timeout.
    #[error("all {capacity} check slots busy for {waited:?}")]
    Exhausted {
        /// Pool capacity
        capacity: usize,
        /// How long the caller waited
        waited: Duration,
    },
    /// The pool was closed.
    #[error("check pool closed")]
    Closed,
}

/// Explicit resource manager for concurrent checks.
///
/// Cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct CheckPermits {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    acquire_timeout: Duration,
}

/// A held slot; released on drop.
#[derive(Debug)]
pub struct CheckPermit {
    _permit: OwnedSemaphorePermit,
}

impl CheckPermits {
    /// A pool of `capacity` permits (at least one).
    pub fn new(capacity: usize, acquire_timeout: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            acquire_timeout,
        }
    }

    /// Pool size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits not currently held.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits up to the acquisition timeout for a permit.
    ///
    /// # Errors
    ///
    /// [`PermitError::Exhausted`] on timeout, [`PermitError::Closed`] after [`CheckPermits::close`].
    pub async fn acquire(&self) -> Result<CheckPermit, PermitError> {
        match tokio::time::timeout(
            self.acquire_timeout,
            Arc::clone(&self.semaphore).acquire_owned(),
        )
        .await
        {
            Ok(Ok(permit)) => Ok(CheckPermit { _permit: permit }),
            Ok(Err(_)) => Err(PermitError::Closed),
            Err(_) => Err(PermitError::Exhausted {
                capacity: self.capacity,
                waited: self.acquire_timeout,
            }),
        }
    }

    /// Fails every pending and future acquisition.
    pub fn close(&self) {
        self.semaphore.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permit_released_on_drop() {
        let permits = CheckPermits::new(2, Duration::from_millis(50));
        let first = permits.acquire().await.unwrap();
        assert_eq!(permits.available(), 1);
        drop(first);
        assert_eq!(permits.available(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_pool_times_out() {
        let permits = CheckPermits::new(1, Duration::from_secs(5));
        let _held = permits.acquire().await.unwrap();

        let err = permits.acquire().await.unwrap_err();
        assert_eq!(
            err,
            PermitError::Exhausted {
                capacity: 1,
                waited: Duration::from_secs(5)
            }
        );
    }

    #[tokio::test]
    async fn test_clones_share_capacity() {
        let permits = CheckPermits::new(1, Duration::from_millis(20));
        let shared = permits.clone();
        let _held = permits.acquire().await.unwrap();
        assert!(shared.acquire().await.is_err());
    }

    #[tokio::test]
    async fn test_closed_pool() {
        let permits = CheckPermits::new(1, Duration::from_millis(20));
        permits.close();
        assert_eq!(permits.acquire().await.unwrap_err(), PermitError::Closed);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(CheckPermits::new(0, Duration::from_secs(1)).capacity(), 1);
    }
}
