// ABOUTME: Injectable random source for window synthesis and calibration jitter
// ABOUTME: Thread-local, seeded ChaCha, and scripted implementations of RandomProvider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Random sources
//!
//! Every randomized step of the pipeline draws through [`RandomProvider`], so the
//! production path can use the per-thread generator while tests and replays
//! substitute a seeded or fully scripted source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Source of the two distributions the pipeline samples from
///
/// Implementations must be safe to share across request handlers.
pub trait RandomProvider: Send + Sync {
    /// Sample uniformly from `[low, high)`; returns `low` when the range is empty
    fn uniform(&self, low: f64, high: f64) -> f64;

    /// Sample from a normal distribution; returns `mean` when `std_dev` is invalid
    fn normal(&self, mean: f64, std_dev: f64) -> f64;
}

fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..high)
}

fn sample_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    Normal::new(mean, std_dev).map_or(mean, |normal| normal.sample(rng))
}

/// Draws from `rand::thread_rng()`, one generator per worker thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandomProvider;

impl RandomProvider for ThreadRandomProvider {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        sample_uniform(&mut rand::thread_rng(), low, high)
    }

    fn normal(&self, mean: f64, std_dev: f64) -> f64 {
        sample_normal(&mut rand::thread_rng(), mean, std_dev)
    }
}

/// Reproducible generator seeded once at startup
///
/// Draws are serialized through a mutex, so concurrent requests interleave
/// but the overall stream is still determined by the seed.
#[derive(Debug)]
pub struct SeededRandomProvider {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandomProvider {
    /// Create a provider from a 64-bit seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomProvider for SeededRandomProvider {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        sample_uniform(&mut *rng, low, high)
    }

    fn normal(&self, mean: f64, std_dev: f64) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        sample_normal(&mut *rng, mean, std_dev)
    }
}

/// Replays fixed draw sequences, one queue per distribution
///
/// Values are returned verbatim regardless of the requested range. Once a queue
/// is exhausted, `uniform` yields the midpoint of the range and `normal` yields
/// the mean.
#[derive(Debug, Default)]
pub struct ScriptedRandomProvider {
    uniforms: Mutex<VecDeque<f64>>,
    normals: Mutex<VecDeque<f64>>,
}

impl ScriptedRandomProvider {
    /// Create a provider replaying the given uniform and normal draws
    #[must_use]
    pub fn new(
        uniforms: impl IntoIterator<Item = f64>,
        normals: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            uniforms: Mutex::new(uniforms.into_iter().collect()),
            normals: Mutex::new(normals.into_iter().collect()),
        }
    }

    /// Number of scripted uniform draws not yet consumed
    #[must_use]
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of scripted normal draws not yet consumed
    #[must_use]
    pub fn remaining_normals(&self) -> usize {
        self.normals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl RandomProvider for ScriptedRandomProvider {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.uniforms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or((low + high) / 2.0)
    }

    fn normal(&self, mean: f64, _std_dev: f64) -> f64 {
        self.normals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(mean)
    }
}
