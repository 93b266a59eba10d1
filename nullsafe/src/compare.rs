/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Pluggable equality for wrapped values.
//!
//! [`Option::eq_by`](crate::Option::eq_by) and
//! [`Result::eq_by`](crate::Result::eq_by) compare through the
//! wrapped value using an [`EqualityStrategy`]. Strategies are
//! implemented once per wrapped type, so string comparison rules live
//! here rather than in the containers.
//!
//! ```
//! use nullsafe::Option;
//! use nullsafe::compare::IgnoreAsciiCase;
//!
//! let name = Option::Some(String::from("Alice"));
//! assert!(name.contains_by(&String::from("ALICE"), &IgnoreAsciiCase));
//! ```

/// A comparison rule for values of type `T`.
///
/// Laws (not enforced by type system):
///
/// - **Reflexive**: `s.equivalent(a, a)`
/// - **Symmetric**: `s.equivalent(a, b) == s.equivalent(b, a)`
pub trait EqualityStrategy<T: ?Sized> {
    /// Whether `a` and `b` are equal under this strategy.
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, S: EqualityStrategy<T> + ?Sized> EqualityStrategy<T> for &S {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (**self).equivalent(a, b)
    }
}

/// Plain `PartialEq` equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordinal;

impl<T: PartialEq + ?Sized> EqualityStrategy<T> for Ordinal {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// String equality ignoring ASCII case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreAsciiCase;

impl EqualityStrategy<str> for IgnoreAsciiCase {
    fn equivalent(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

impl EqualityStrategy<String> for IgnoreAsciiCase {
    fn equivalent(&self, a: &String, b: &String) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

/// String equality under Unicode lowercase folding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreCase;

impl EqualityStrategy<str> for IgnoreCase {
    fn equivalent(&self, a: &str, b: &str) -> bool {
        a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
    }
}

impl EqualityStrategy<String> for IgnoreCase {
    fn equivalent(&self, a: &String, b: &String) -> bool {
        EqualityStrategy::<str>::equivalent(self, a.as_str(), b.as_str())
    }
}

/// Equality by a derived key, e.g. `ByKey(|s: &String| s.len())`.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<T: ?Sized, K: PartialEq, F: Fn(&T) -> K> EqualityStrategy<T> for ByKey<F> {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.0)(a) == (self.0)(b)
    }
}
