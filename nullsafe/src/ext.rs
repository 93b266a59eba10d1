/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Extension traits bridging plain values and the standard library
//! types into this crate's containers.

use std::option::Option as StdOption;
use std::result::Result as StdResult;

use crate::lazy_array::LazyArray;
use crate::option::Option;
use crate::result::Result;

/// Conversion from `std::option::Option` into [`Option`].
pub trait StdOptionExt<T> {
    /// `Some(v)` becomes `Some(v)`; `None` becomes `None`.
    fn into_option(self) -> Option<T>;
}

impl<T> StdOptionExt<T> for StdOption<T> {
    fn into_option(self) -> Option<T> {
        Option::wrap(self)
    }
}

/// Conversion from `std::result::Result` into [`Result`].
pub trait StdResultExt<T, E> {
    /// `Ok(v)` becomes `Ok(v)`; `Err(e)` becomes `Err(e)`.
    fn into_result(self) -> Result<T, E>;
}

impl<T, E> StdResultExt<T, E> for StdResult<T, E> {
    fn into_result(self) -> Result<T, E> {
        Result::from(self)
    }
}

/// Guards that turn a plain value into an [`Option`].
pub trait ValueExt: Sized {
    /// `None` if `self == other`, otherwise `Some(self)`.
    ///
    /// ```
    /// use nullsafe::ext::ValueExt;
    ///
    /// assert!("".none_if_eq(&"").is_none());
    /// assert_eq!("x".none_if_eq(&"").unwrap(), "x");
    /// ```
    fn none_if_eq<U: ?Sized>(self, other: &U) -> Option<Self>
    where
        Self: PartialEq<U>,
    {
        if self == *other {
            Option::None
        } else {
            Option::Some(self)
        }
    }

    /// `None` if `self` equals any of `others`, otherwise `Some(self)`.
    fn none_if_any<'a, U: 'a>(self, others: impl IntoIterator<Item = &'a U>) -> Option<Self>
    where
        Self: PartialEq<U>,
    {
        if others.into_iter().any(|other| self == *other) {
            Option::None
        } else {
            Option::Some(self)
        }
    }
}

impl<T> ValueExt for T {}

/// Conversion of any iterable into an unevaluated [`LazyArray`].
pub trait IntoLazyArray: IntoIterator + Sized {
    /// Wraps `self` as the pull source of a new [`LazyArray`]. Nothing
    /// is pulled until the array is enumerated or measured.
    ///
    /// A `Vec` is drained lazily like any other source; convert it
    /// with `LazyArray::from(vec)` to start out evaluated.
    fn into_lazy_array(self) -> LazyArray<Self::Item>
    where
        Self::IntoIter: 'static,
    {
        LazyArray::from_source(self)
    }
}

impl<I: IntoIterator> IntoLazyArray for I {}
