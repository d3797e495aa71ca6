//! # Shopper Session Module
//!
//! Owns the single stateful shopper session used for product searches.
//! The session is launched lazily, handed out one caller at a time, and torn
//! down and relaunched when a caller asks for a different headless mode.
//!
//! The search collaborator behind a session is not safe for concurrent use,
//! so every search goes through [`SessionPool::acquire`], which holds the
//! pool lock until the returned guard is dropped.

use crate::error::ShopError;
use crate::ingredient_model::CandidateProduct;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// A live product search session (a browser tab, an API client, ...)
#[allow(async_fn_in_trait)]
pub trait ProductSearch {
    /// Search one storefront; zero results is `Ok(vec![])`
    async fn search(&mut self, query: &str, storefront: &str) -> Result<Vec<CandidateProduct>, ShopError>;

    /// Release the session's resources
    async fn shutdown(&mut self) -> Result<(), ShopError>;
}

/// Launches new search sessions
#[allow(async_fn_in_trait)]
pub trait SessionFactory {
    type Session: ProductSearch;

    async fn launch(&self, headless: bool) -> Result<Self::Session, ShopError>;
}

struct ActiveSession<S> {
    session: S,
    headless: bool,
}

/// Exclusive access to the current session; released on drop
pub type SessionGuard<'a, S> = MappedMutexGuard<'a, S>;

/// Single-session pool with lazy launch and mode-change relaunch
pub struct SessionPool<F: SessionFactory> {
    factory: F,
    active: Mutex<Option<ActiveSession<F::Session>>>,
    launches: AtomicU32,
}

impl<F: SessionFactory> SessionPool<F> {
    /// Create an empty pool; nothing is launched until the first acquire
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            active: Mutex::new(None),
            launches: AtomicU32::new(0),
        }
    }

    /// Borrow the session, launching it or switching its mode first if needed
    pub async fn acquire(&self, headless: bool) -> Result<SessionGuard<'_, F::Session>, ShopError> {
        let mut slot = self.active.lock().await;

        let mode_changed = matches!(slot.as_ref(), Some(active) if active.headless != headless);
        if mode_changed {
            info!(headless, "Session mode changed, relaunching");
            if let Some(mut previous) = slot.take() {
                stop(&mut previous.session).await;
            }
        }

        if slot.is_none() {
            debug!(headless, "Launching shopper session");
            let session = self.factory.launch(headless).await?;
            self.launches.fetch_add(1, Ordering::Relaxed);
            *slot = Some(ActiveSession { session, headless });
        }

        MutexGuard::try_map(slot, |slot| slot.as_mut().map(|active| &mut active.session))
            .map_err(|_| ShopError::Session("no active session after launch".to_string()))
    }

    /// Replace the current session with a fresh one in the same mode
    ///
    /// Does nothing when no session is running.
    pub async fn restart(&self) -> Result<(), ShopError> {
        let mut slot = self.active.lock().await;
        let Some(mut previous) = slot.take() else {
            return Ok(());
        };

        info!(headless = previous.headless, "Restarting shopper session");
        stop(&mut previous.session).await;

        let session = self.factory.launch(previous.headless).await?;
        self.launches.fetch_add(1, Ordering::Relaxed);
        *slot = Some(ActiveSession {
            session,
            headless: previous.headless,
        });
        Ok(())
    }

    /// Shut the current session down; the next acquire launches a new one
    pub async fn close(&self) {
        let mut slot = self.active.lock().await;
        if let Some(mut previous) = slot.take() {
            info!("Closing shopper session");
            stop(&mut previous.session).await;
        }
    }

    /// Headless mode of the running session, if any
    pub async fn current_mode(&self) -> Option<bool> {
        self.active.lock().await.as_ref().map(|active| active.headless)
    }

    /// Number of sessions launched over the pool's lifetime
    pub fn launch_count(&self) -> u32 {
        self.launches.load(Ordering::Relaxed)
    }
}

// Shutdown failures are logged, never propagated; the session is discarded either way
async fn stop<S: ProductSearch>(session: &mut S) {
    if let Err(e) = session.shutdown().await {
        warn!(error = %e, "Failed to shut down shopper session cleanly");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        launched: AtomicU32,
        stopped: AtomicU32,
    }

    struct FakeSession {
        headless: bool,
        counters: Arc<Counters>,
    }

    impl ProductSearch for FakeSession {
        async fn search(&mut self, query: &str, storefront: &str) -> Result<Vec<CandidateProduct>, ShopError> {
            let title = format!("{query} ({storefront}, headless={})", self.headless);
            Ok(vec![CandidateProduct::new("X1", &title)])
        }

        async fn shutdown(&mut self) -> Result<(), ShopError> {
            self.counters.stopped.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FakeFactory {
        counters: Arc<Counters>,
    }

    impl SessionFactory for FakeFactory {
        type Session = FakeSession;

        async fn launch(&self, headless: bool) -> Result<FakeSession, ShopError> {
            self.counters.launched.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                headless,
                counters: Arc::clone(&self.counters),
            })
        }
    }

    fn pool() -> (SessionPool<FakeFactory>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let pool = SessionPool::new(FakeFactory {
            counters: Arc::clone(&counters),
        });
        (pool, counters)
    }

    #[tokio::test]
    async fn test_lazy_launch_and_reuse() {
        let (pool, counters) = pool();
        assert_eq!(pool.current_mode().await, None);

        {
            let mut session = pool.acquire(true).await.unwrap();
            let results = session.search("basil", "fresh").await.unwrap();
            assert_eq!(results.len(), 1);
        }
        {
            let _session = pool.acquire(true).await.unwrap();
        }

        assert_eq!(counters.launched.load(Ordering::SeqCst), 1);
        assert_eq!(pool.launch_count(), 1);
        assert_eq!(pool.current_mode().await, Some(true));
    }

    #[tokio::test]
    async fn test_mode_change_relaunches() {
        let (pool, counters) = pool();
        drop(pool.acquire(false).await.unwrap());
        drop(pool.acquire(true).await.unwrap());

        assert_eq!(counters.launched.load(Ordering::SeqCst), 2);
        assert_eq!(counters.stopped.load(Ordering::SeqCst), 1);
        assert_eq!(pool.current_mode().await, Some(true));
    }

    #[tokio::test]
    async fn test_restart_keeps_mode() {
        let (pool, counters) = pool();
        pool.restart().await.unwrap();
        assert_eq!(counters.launched.load(Ordering::SeqCst), 0);

        drop(pool.acquire(true).await.unwrap());
        pool.restart().await.unwrap();
        assert_eq!(counters.launched.load(Ordering::SeqCst), 2);
        assert_eq!(counters.stopped.load(Ordering::SeqCst), 1);
        assert_eq!(pool.current_mode().await, Some(true));
    }

    #[tokio::test]
    async fn test_close() {
        let (pool, counters) = pool();
        drop(pool.acquire(false).await.unwrap());
        pool.close().await;
        assert_eq!(pool.current_mode().await, None);
        assert_eq!(counters.stopped.load(Ordering::SeqCst), 1);

        drop(pool.acquire(false).await.unwrap());
        assert_eq!(pool.launch_count(), 2);
    }
}
