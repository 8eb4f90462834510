// ABOUTME: Generic entity-loading state with a generation guard per load cycle
// ABOUTME: Stale load responses are discarded instead of overwriting fresher state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Generation-guarded entity loading
//!
//! The loading pattern shared by every store: begin a cycle, fetch, commit.
//! Each cycle gets a generation number; only the newest cycle may commit or
//! clear the loading flag. A response that resolves after a newer cycle has
//! started is dropped on the floor; re-running the load for the new user
//! identity is the newer cycle's job.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Observable state of a loadable entity.
///
/// `Loading` is distinct from "fetched and absent" so callers never mistake
/// a zero value for loaded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    /// No load cycle has settled yet
    Loading,
    /// A load cycle settled; the payload may legitimately be absent
    Ready(T),
}

impl<T> LoadState<T> {
    /// Whether this is the loading state
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Shared loading machinery for one entity.
pub struct Loader<T> {
    value: RwLock<Option<T>>,
    loading: AtomicBool,
    generation: AtomicU64,
}

impl<T: Clone> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Loader<T> {
    /// A loader that has never fetched
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
            loading: AtomicBool::new(true),
            generation: AtomicU64::new(0),
        }
    }

    /// Begin a load cycle: raises the loading flag and returns the cycle's
    /// generation. Any previously started cycle is now stale.
    pub fn begin(&self) -> u64 {
        self.loading.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit a cycle's result. Returns `false` (and changes nothing) when a
    /// newer cycle has started since `generation` was issued.
    pub async fn commit(&self, generation: u64, value: T) -> bool {
        let mut slot = self.value.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *slot = Some(value);
        self.loading.store(false, Ordering::SeqCst);
        true
    }

    /// Settle a cycle without touching the value (swallowed read failure:
    /// prior state stays intact, loading clears).
    pub fn settle(&self, generation: u64) {
        if self.generation.load(Ordering::SeqCst) == generation {
            self.loading.store(false, Ordering::SeqCst);
        }
    }

    /// Replace the value outside a load cycle (optimistic local writes).
    /// Bumps the generation so any in-flight cycle becomes stale.
    pub async fn force(&self, value: T) {
        let mut slot = self.value.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *slot = Some(value);
        self.loading.store(false, Ordering::SeqCst);
    }

    /// Mutate the value in place when one exists, outside a load cycle
    pub async fn mutate(&self, f: impl FnOnce(&mut T)) {
        let mut slot = self.value.write().await;
        if let Some(value) = slot.as_mut() {
            self.generation.fetch_add(1, Ordering::SeqCst);
            f(value);
        }
    }

    /// Last committed value, when any
    pub async fn value(&self) -> Option<T> {
        self.value.read().await.clone()
    }

    /// Last committed value, or the given default
    pub async fn value_or(&self, default: T) -> T {
        self.value.read().await.clone().unwrap_or(default)
    }

    /// Whether a load cycle is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Observable state: `Loading` until the first cycle settles, then
    /// `Ready` with the last-known payload (absent payloads stay absent)
    pub async fn state(&self) -> LoadState<Option<T>> {
        let value = self.value.read().await.clone();
        if value.is_none() && self.is_loading() {
            LoadState::Loading
        } else {
            LoadState::Ready(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_loading() {
        let loader: Loader<u32> = Loader::new();
        assert!(loader.is_loading());
        assert_eq!(loader.state().await, LoadState::Loading);
    }

    #[tokio::test]
    async fn test_commit_settles() {
        let loader = Loader::new();
        let generation = loader.begin();
        assert!(loader.commit(generation, 7).await);
        assert!(!loader.is_loading());
        assert_eq!(loader.value().await, Some(7));
    }

    #[tokio::test]
    async fn test_stale_commit_is_discarded() {
        let loader = Loader::new();
        let stale = loader.begin();
        let fresh = loader.begin();
        assert!(loader.commit(fresh, 2).await);
        assert!(!loader.commit(stale, 1).await);
        assert_eq!(loader.value().await, Some(2));
    }

    #[tokio::test]
    async fn test_settle_keeps_prior_value() {
        let loader = Loader::new();
        let first = loader.begin();
        loader.commit(first, 5).await;

        let second = loader.begin();
        assert!(loader.is_loading());
        loader.settle(second);
        assert!(!loader.is_loading());
        assert_eq!(loader.value().await, Some(5));
    }

    #[tokio::test]
    async fn test_force_invalidates_in_flight_cycle() {
        let loader = Loader::new();
        let in_flight = loader.begin();
        loader.force(9).await;
        assert!(!loader.commit(in_flight, 1).await);
        assert_eq!(loader.value().await, Some(9));
    }
}
