//! # Caching Module
//!
//! This module provides the fitness cache. Fitness is a pure function of the
//! chromosome, so a cached score is never stale; the cache is cleared between
//! independent runs only to bound memory.
//!
//! The cache is shared between rayon workers when fitness evaluation runs in
//! parallel. A miss is computed outside the lock and inserted with
//! populate-if-absent semantics, so two workers racing on the same key may both
//! compute it but the map always keeps a single, correct value.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::evolution::Challenge;

/// A trait for values that can be used as fitness cache keys.
pub trait CacheKey: Clone + Debug + Send + Sync {
    /// The type of the cache key.
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    /// Generates a cache key for this value.
    ///
    /// Values that would have the same fitness score should have the same cache key.
    fn cache_key(&self) -> Self::Key;
}

/// A wrapper around a challenge that memoizes its scores.
#[derive(Debug, Clone)]
pub struct CachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    challenge: C,
    cache: Arc<Mutex<HashMap<P::Key, usize>>>,
    _marker: PhantomData<P>,
}

impl<P, C> CachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    /// Creates a new cached challenge wrapping the given challenge.
    pub fn new(challenge: C) -> Self {
        Self {
            challenge,
            cache: Arc::new(Mutex::new(HashMap::new())),
            _marker: PhantomData,
        }
    }

    /// Returns a reference to the wrapped challenge.
    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the cached score of `phenotype`, if it was scored before.
    pub fn cached(&self, phenotype: &P) -> Option<usize> {
        self.lock().get(&phenotype.cache_key()).copied()
    }

    /// Returns the number of cached fitness evaluations.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    // Scores are plain integers, so a panic elsewhere cannot leave an entry half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<P::Key, usize>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P, C> Challenge<P> for CachedChallenge<P, C>
where
    P: CacheKey,
    C: Challenge<P>,
{
    fn score(&self, phenotype: &P) -> usize {
        let key = phenotype.cache_key();

        if let Some(score) = self.lock().get(&key) {
            return *score;
        }

        let score = self.challenge.score(phenotype);
        *self.lock().entry(key).or_insert(score)
    }
}
