/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Process-wide configuration for this crate.
//!
//! Values are resolved through layers, highest precedence first:
//! `TestOverride -> Env -> Runtime -> Default`.
//!
//! - The `Env` layer is seeded once, on first access, from
//!   [`MEMO_CAPACITY_ENV`]. Unparsable values are logged and ignored.
//! - [`set`] installs (or replaces) the `Runtime` layer.
//! - In tests, [`lock`] serializes access and
//!   [`ConfigLock::override_config`] pushes a `TestOverride` layer that
//!   is removed when the guard drops.
//!
//! ```ignore
//! #[test]
//! fn test_my_feature() {
//!     let config = nullsafe::config::lock();
//!     let _guard = config.override_config(Config { memo_capacity: 16 });
//!     // ... test logic here ...
//! }
//! ```

use std::env;
use std::marker::PhantomData;
use std::sync::LazyLock;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::RwLock;

/// Environment variable consulted for [`Config::memo_capacity`].
pub const MEMO_CAPACITY_ENV: &str = "NULLSAFE_MEMO_CAPACITY";

/// Tunables for the containers in this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Initial capacity of the memo buffer of an unevaluated
    /// [`LazyArray`](crate::LazyArray). The buffer grows as needed.
    /// Defaults to 0.
    pub memo_capacity: usize,
}

/// Configuration source layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Source {
    /// Values set programmatically via [`set`].
    Runtime,
    /// Values read from environment variables on first access.
    Env,
    /// Values installed by [`ConfigLock::override_config`]. Always
    /// wins; removed when the guard drops.
    TestOverride,
}

/// Smaller number = higher precedence.
fn priority(source: Source) -> u8 {
    match source {
        Source::TestOverride => 0,
        Source::Env => 1,
        Source::Runtime => 2,
    }
}

struct Layer {
    source: Source,
    config: Config,
}

/// Kept sorted by `priority`.
struct Layers {
    ordered: Vec<Layer>,
}

impl Layers {
    fn insert(&mut self, source: Source, config: Config) {
        self.remove(source);
        self.ordered.push(Layer { source, config });
        self.ordered.sort_by_key(|layer| priority(layer.source));
    }

    fn remove(&mut self, source: Source) {
        self.ordered.retain(|layer| layer.source != source);
    }

    fn resolve(&self) -> Config {
        self.ordered
            .first()
            .map_or_else(Config::default, |layer| layer.config)
    }
}

static LAYERS: LazyLock<RwLock<Layers>> = LazyLock::new(|| {
    let mut layers = Layers {
        ordered: Vec::new(),
    };
    if let Some(config) = from_env(|name| env::var(name).ok()) {
        layers.insert(Source::Env, config);
    }
    RwLock::new(layers)
});

/// Build the `Env` layer using `lookup` to read variables. Returns
/// `None` when nothing usable is set.
fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<Config> {
    let raw = lookup(MEMO_CAPACITY_ENV)?;
    match raw.trim().parse::<usize>() {
        Ok(memo_capacity) => {
            tracing::info!(
                "loaded configuration from environment: {}={}",
                MEMO_CAPACITY_ENV,
                memo_capacity
            );
            Some(Config { memo_capacity })
        }
        Err(e) => {
            tracing::error!(
                "failed to override config from value \"{}\" in ${}: {}",
                raw,
                MEMO_CAPACITY_ENV,
                e
            );
            None
        }
    }
}

/// The effective configuration.
pub fn get() -> Config {
    LAYERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .resolve()
}

/// Install `config` as the `Runtime` layer, replacing any previous
/// one. `Env` and test overrides still take precedence.
pub fn set(config: Config) {
    LAYERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(Source::Runtime, config);
}

/// Remove the `Runtime` layer.
pub fn clear() {
    LAYERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(Source::Runtime);
}

/// Acquire the global configuration lock.
///
/// Serializes configuration mutations. Any test override installed
/// through the returned lock is removed when it drops.
pub fn lock() -> ConfigLock {
    static MUTEX: Mutex<()> = Mutex::new(());
    ConfigLock {
        _guard: MUTEX.lock().unwrap_or_else(PoisonError::into_inner),
    }
}

/// Guard returned by [`lock`].
pub struct ConfigLock {
    _guard: MutexGuard<'static, ()>,
}

impl ConfigLock {
    /// Make `config` the effective configuration until the returned
    /// guard is dropped.
    pub fn override_config(&self, config: Config) -> ConfigGuard<'_> {
        let mut layers = LAYERS.write().unwrap_or_else(PoisonError::into_inner);
        let previous = layers
            .ordered
            .iter()
            .find(|layer| layer.source == Source::TestOverride)
            .map(|layer| layer.config);
        layers.insert(Source::TestOverride, config);
        ConfigGuard {
            previous,
            _phantom: PhantomData,
        }
    }
}

impl Drop for ConfigLock {
    fn drop(&mut self) {
        LAYERS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(Source::TestOverride);
    }
}

/// Restores the previous test override (if any) when dropped.
pub struct ConfigGuard<'a> {
    previous: Option<Config>,
    // Ties the guard to its `ConfigLock`.
    _phantom: PhantomData<&'a ()>,
}

impl Drop for ConfigGuard<'_> {
    fn drop(&mut self) {
        let mut layers = LAYERS.write().unwrap_or_else(PoisonError::into_inner);
        match self.previous {
            Some(config) => layers.insert(Source::TestOverride, config),
            None => layers.remove(Source::TestOverride),
        }
    }
}
