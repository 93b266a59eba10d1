/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Error types shared by the containers in this crate.

use std::borrow::Cow;

/// The type of error raised by container accessors.
///
/// Combinators never produce these; only the accessors that must
/// produce a value (`unwrap`, `expect`, indexing, insertion) do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A value was demanded from an empty [`Option`](crate::Option).
    #[error("{message}")]
    EmptyValue {
        /// What was demanded.
        message: Cow<'static, str>,
    },

    /// A value was demanded from an `Err` [`Result`](crate::Result).
    #[error("{message}: {error}")]
    UnwrapOnErr {
        /// The caller's context.
        message: Cow<'static, str>,
        /// The `Debug` rendering of the error that was held.
        error: String,
    },

    /// An absent value was supplied where a present one is required.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Which argument, and why it was rejected.
        reason: Cow<'static, str>,
    },

    /// An index or offset fell outside of `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index or end offset.
        index: usize,
        /// The length of the sequence indexed into.
        len: usize,
    },
}

impl Error {
    pub(crate) fn empty_value() -> Self {
        Self::EmptyValue {
            message: Cow::Borrowed("called `unwrap` on a `None` value"),
        }
    }

    pub(crate) fn unwrap_on_err<E: std::fmt::Debug>(error: &E) -> Self {
        Self::UnwrapOnErr {
            message: Cow::Borrowed("called `unwrap` on an `Err` value"),
            error: format!("{:?}", error),
        }
    }
}

/// A generic error description, used as the default error type of
/// [`Result`](crate::Result).
///
/// `Failure::default()` is the substitute for an absent error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    message: Cow<'static, str>,
}

impl Failure {
    /// Create a failure with the provided message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for Failure {
    fn default() -> Self {
        Self::new("an unspecified error occurred")
    }
}

impl From<&'static str> for Failure {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
