/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for [`Option`], [`Result`] and
//! [`LazyArray`].
//!
//! Used by the `proptest`-based tests in this crate:
//!
//! ```ignore
//! use proptest::prelude::*;
//!
//! use crate::strategy::gen_option;
//!
//! proptest! {
//!     #[test]
//!     fn test_option(opt in gen_option(any::<i32>())) {
//!         // Use `opt` as input to combinator laws.
//!     }
//! }
//! ```
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use std::fmt::Debug;

use proptest::prelude::*;

use crate::LazyArray;
use crate::Option;
use crate::Result;

/// Generates `Some` or `None` with roughly equal weight, wrapping
/// values drawn from `value`.
pub fn gen_option<S>(value: S) -> impl Strategy<Value = Option<S::Value>>
where
    S: Strategy,
    S::Value: Debug,
{
    prop::option::of(value).prop_map(Option::wrap)
}

/// Generates `Ok` values from `ok` or `Err` values from `err`.
pub fn gen_result<S, F>(ok: S, err: F) -> impl Strategy<Value = Result<S::Value, F::Value>>
where
    S: Strategy,
    S::Value: Debug,
    F: Strategy,
    F::Value: Debug,
{
    prop::result::maybe_ok(ok, err).prop_map(Result::<S::Value, F::Value>::from)
}

/// Generates the items of a [`LazyArray`] together with how many of
/// them to enumerate before forcing: `(items, prefix)` with
/// `prefix <= items.len()`.
pub fn gen_items_and_prefix(max_len: usize) -> impl Strategy<Value = (Vec<i32>, usize)> {
    prop::collection::vec(any::<i32>(), 0..=max_len).prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..=len)
    })
}

/// An unevaluated [`LazyArray`] over `items`.
pub fn lazy(items: Vec<i32>) -> LazyArray<i32> {
    LazyArray::from_source(items)
}
