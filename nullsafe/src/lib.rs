/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

#![deny(missing_docs)]

//! Null-safe containers: optional values, explicit success/failure
//! outcomes, and deferred sequences that evaluate their source at
//! most once.
//!
//! # Quick Start
//!
//! ```rust
//! use nullsafe::LazyArray;
//! use nullsafe::Option;
//! use nullsafe::Result;
//!
//! // Option<T> is Some(value) or None, never "Some(nothing)".
//! let name = Option::wrap(std::env::var("NO_SUCH_VARIABLE").ok());
//! assert_eq!(name.unwrap_or_else(|| "anonymous".to_string()), "anonymous");
//!
//! // Result<T, E> is Ok(value) or Err(error); chains short-circuit.
//! let parsed: Result<i32, String> = Result::Ok(20);
//! let doubled = parsed.and_then(|n| Result::Ok(n * 2));
//! assert_eq!(doubled.unwrap(), 40);
//!
//! // LazyArray<T> pulls from its source only on demand.
//! let squares = LazyArray::from_source((1..=4).map(|n| n * n));
//! assert!(!squares.is_evaluated());
//! assert_eq!(squares.iter().take(2).collect::<Vec<_>>(), vec![1, 4]);
//! assert_eq!(squares.len(), 4);
//! ```
//!
//! # Core Concepts
//!
//! - **[`Option`]**: presence or absence of a value. Constructors
//!   demote an absent raw value to `None` ([`Option::wrap`]) or reject
//!   it ([`Option::try_some`]).
//!
//! - **[`Result`]**: a success value or an error. The error type
//!   defaults to [`Failure`], a message-carrying error.
//!
//! - **[`LazyArray`]**: a memoizing sequence over a one-shot
//!   [`PullCursor`]. Enumerations interleave safely; the source is
//!   drained at most once.
//!
//! - **[`compare::EqualityStrategy`]**: pluggable equivalence used by
//!   `eq_by`/`contains_by`.
//!
//! Accessors that panic on the wrong variant (`unwrap`, `expect`,
//! indexing) have non-panicking counterparts that return [`Error`].
//!
//! # Configuration
//!
//! See [`config`]. The only tunable is the initial memo capacity of
//! an unevaluated [`LazyArray`], read from `NULLSAFE_MEMO_CAPACITY`.

pub mod compare;
pub mod config;
mod error;
pub mod ext;
mod lazy_array;
mod option;
mod result;

/// Property-based generators for tests.
#[cfg(test)]
pub mod strategy;

pub use error::Error;
pub use error::Failure;
pub use lazy_array::Iter;
pub use lazy_array::LazyArray;
pub use lazy_array::PullCursor;
pub use option::Option;
pub use result::Result;
