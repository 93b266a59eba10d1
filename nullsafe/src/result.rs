/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Explicit, recoverable results.
//!
//! [`Result<T, E>`] is either `Ok(value)` or `Err(error)`. An `Err`
//! always carries an error: constructors that may receive an absent
//! error substitute `E::default()` (for the default error type
//! [`Failure`], a generic "unspecified" message).
//!
//! ```
//! use nullsafe::Result;
//!
//! let parsed: Result<i32, &str> = Result::Ok(5);
//! assert_eq!(parsed.and_then(|x| Result::Ok(x + 1)).unwrap(), 6);
//!
//! let failed: Result<i32, &str> = Result::Err("boom");
//! let chained = failed.and_then(|x| Result::Ok(x + 1));
//! assert_eq!(chained.err().unwrap(), "boom");
//! ```

use std::fmt;
use std::option::Option as StdOption;
use std::result::Result as StdResult;

use crate::compare::EqualityStrategy;
use crate::error::Error;
use crate::error::Failure;
use crate::option::Option;

/// Success (`Ok`) carrying a value, or failure (`Err`) carrying an
/// error description.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[must_use = "this `Result` may be an `Err` variant, which should be handled"]
pub enum Result<T, E = Failure> {
    /// Success.
    Ok(T),
    /// Failure.
    Err(E),
}

impl<T, E> Result<T, E> {
    /// `Ok(value)` when present, otherwise `Err(E::default())`.
    pub fn wrap(value: StdOption<T>) -> Self
    where
        E: Default,
    {
        match value {
            StdOption::Some(value) => Self::Ok(value),
            StdOption::None => Self::Err(E::default()),
        }
    }

    /// An `Err` carrying `error`, or `E::default()` when `error` is
    /// absent.
    pub fn from_error(error: StdOption<E>) -> Self
    where
        E: Default,
    {
        Self::Err(error.unwrap_or_default())
    }

    /// Converts into the standard library's `Result`.
    pub fn into_std(self) -> StdResult<T, E> {
        match self {
            Self::Ok(value) => StdResult::Ok(value),
            Self::Err(err) => StdResult::Err(err),
        }
    }

    /// Returns true if this is an `Ok`.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns true if this is an `Err`.
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Converts from `&Result<T, E>` to `Result<&T, &E>`.
    pub fn as_ref(&self) -> Result<&T, &E> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(err) => Result::Err(err),
        }
    }

    /// Converts from `&mut Result<T, E>` to `Result<&mut T, &mut E>`.
    pub fn as_mut(&mut self) -> Result<&mut T, &mut E> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(err) => Result::Err(err),
        }
    }

    /// The success value as an [`Option`]; `None` on `Err`.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Option::Some(value),
            Self::Err(_) => Option::None,
        }
    }

    /// The error as an [`Option`]; `None` on `Ok`.
    pub fn err(self) -> Option<E> {
        match self {
            Self::Ok(_) => Option::None,
            Self::Err(err) => Option::Some(err),
        }
    }

    /// Transforms the success value, leaving an error untouched.
    pub fn map<U>(self, op: impl FnOnce(T) -> U) -> Result<U, E> {
        match self {
            Self::Ok(value) => Result::Ok(op(value)),
            Self::Err(err) => Result::Err(err),
        }
    }

    /// Transforms the error, leaving a success value untouched.
    pub fn map_err<F>(self, op: impl FnOnce(E) -> F) -> Result<T, F> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(err) => Result::Err(op(err)),
        }
    }

    /// Applies `op` to the success value, or returns `default`.
    pub fn map_or<U>(self, default: U, op: impl FnOnce(T) -> U) -> U {
        match self {
            Self::Ok(value) => op(value),
            Self::Err(_) => default,
        }
    }

    /// Reduces both branches to a common type: `fallback` handles the
    /// error, `map` the success value.
    pub fn map_or_else<U>(self, fallback: impl FnOnce(E) -> U, map: impl FnOnce(T) -> U) -> U {
        match self {
            Self::Ok(value) => map(value),
            Self::Err(err) => fallback(err),
        }
    }

    /// Returns `res` if this is `Ok`; otherwise propagates this error.
    pub fn and<U>(self, res: Result<U, E>) -> Result<U, E> {
        match self {
            Self::Ok(_) => res,
            Self::Err(err) => Result::Err(err),
        }
    }

    /// Chains a fallible operation; an `Err` short-circuits without
    /// invoking `op` and is propagated untouched.
    pub fn and_then<U>(self, op: impl FnOnce(T) -> Result<U, E>) -> Result<U, E> {
        match self {
            Self::Ok(value) => op(value),
            Self::Err(err) => Result::Err(err),
        }
    }

    /// Returns this result if it is `Ok`, otherwise `res`.
    pub fn or<F>(self, res: Result<T, F>) -> Result<T, F> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(_) => res,
        }
    }

    /// Returns this result if it is `Ok`, otherwise calls `op` with
    /// the error.
    pub fn or_else<F>(self, op: impl FnOnce(E) -> Result<T, F>) -> Result<T, F> {
        match self {
            Self::Ok(value) => Result::Ok(value),
            Self::Err(err) => op(err),
        }
    }

    /// Returns the success value or `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => default,
        }
    }

    /// Returns the success value or computes one from the error.
    pub fn unwrap_or_else(self, op: impl FnOnce(E) -> T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => op(err),
        }
    }

    /// Returns the success value or computes one, ignoring the error.
    pub fn unwrap_or_compute(self, op: impl FnOnce() -> T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err(_) => op(),
        }
    }

    /// Returns the success value or `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_compute(T::default)
    }

    /// Returns the success value, or [`Error::UnwrapOnErr`] describing
    /// the original error.
    pub fn try_unwrap(self) -> StdResult<T, Error>
    where
        E: fmt::Debug,
    {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(err) => Err(Error::unwrap_on_err(&err)),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::UnwrapOnErr`] if this is an `Err`.
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Returns the success value.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::UnwrapOnErr`] carrying `message` if this
    /// is an `Err`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(err) => panic!(
                "{}",
                Error::UnwrapOnErr {
                    message: message.to_string().into(),
                    error: format!("{:?}", err),
                }
            ),
        }
    }

    /// Returns the error.
    ///
    /// # Panics
    ///
    /// Panics if this is an `Ok`.
    #[track_caller]
    pub fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Self::Ok(value) => panic!("called `unwrap_err` on an `Ok` value: {:?}", value),
            Self::Err(err) => err,
        }
    }

    /// Returns true if this is an `Ok` whose value equals `value`.
    pub fn contains<U>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Self::Ok(wrapped) => wrapped == value,
            Self::Err(_) => false,
        }
    }

    /// Compares success values using `strategy`. An `Err` is never
    /// equivalent to anything.
    pub fn eq_by<S: EqualityStrategy<T>>(&self, other: &Result<T, E>, strategy: &S) -> bool {
        match (self, other) {
            (Self::Ok(a), Self::Ok(b)) => strategy.equivalent(a, b),
            _ => false,
        }
    }

    /// An iterator over the success value (zero or one item).
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref().ok().into_iter()
    }
}

impl<T, E> Result<Option<T>, E> {
    /// Transposes a result of an option into an option of a result.
    ///
    /// `Ok(None)` becomes `None`; `Ok(Some(v))` and `Err(e)` become
    /// `Some(Ok(v))` and `Some(Err(e))`.
    pub fn transpose(self) -> Option<Result<T, E>> {
        match self {
            Self::Ok(Option::None) => Option::None,
            Self::Ok(Option::Some(value)) => Option::Some(Result::Ok(value)),
            Self::Err(err) => Option::Some(Result::Err(err)),
        }
    }
}

impl<T, E> From<T> for Result<T, E> {
    fn from(value: T) -> Self {
        Self::Ok(value)
    }
}

impl<T, E> From<StdResult<T, E>> for Result<T, E> {
    fn from(result: StdResult<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err),
        }
    }
}

impl<T, E> From<Result<T, E>> for StdResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        result.into_std()
    }
}

impl<T, E> IntoIterator for Result<T, E> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.ok().into_iter()
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Result<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => write!(f, "Ok({})", value),
            Self::Err(err) => write!(f, "Err({})", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;
    use crate::compare::IgnoreCase;
    use crate::strategy::gen_result;

    #[test]
    fn test_and_then() {
        let ok: Result<i32, &str> = Result::Ok(5);
        assert_eq!(ok.and_then(|x| Result::Ok(x + 1)).unwrap(), 6);

        let calls = Cell::new(0);
        let err: Result<i32, &str> = Result::Err("boom");
        let chained = err.and_then(|x| {
            calls.set(calls.get() + 1);
            Result::Ok(x + 1)
        });
        assert!(chained.is_err());
        assert_eq!(chained.unwrap_err(), "boom");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_and() {
        let ok: Result<i32, &str> = Result::Ok(1);
        assert_eq!(ok.and(Result::<&str, &str>::Ok("x")), Result::Ok("x"));
        let err: Result<i32, &str> = Result::Err("first");
        assert_eq!(err.and(Result::<&str, &str>::Err("second")), Result::Err("first"));
    }

    #[test]
    fn test_map_and_map_err_are_independent() {
        let ok: Result<i32, i32> = Result::Ok(2);
        assert_eq!(ok.map(|x| x * 10).map_err(|e| e - 1), Result::Ok(20));
        let err: Result<i32, i32> = Result::Err(2);
        assert_eq!(err.map(|x| x * 10).map_err(|e| e - 1), Result::Err(1));
    }

    #[test]
    fn test_ok_and_err() {
        let ok: Result<i32, &str> = Result::Ok(1);
        assert_eq!(ok.ok(), Option::Some(1));
        assert_eq!(ok.err(), Option::None);
        let err: Result<i32, &str> = Result::Err("e");
        assert_eq!(err.ok(), Option::None);
        assert_eq!(err.err(), Option::Some("e"));
    }

    #[test]
    fn test_unwrap_recovery() {
        let err: Result<i32, &str> = Result::Err("bad");
        assert_eq!(err.unwrap_or(0), 0);
        assert_eq!(err.unwrap_or_compute(|| 7), 7);
        assert_eq!(err.unwrap_or_else(|e| e.len() as i32), 3);
        assert_eq!(err.unwrap_or_default(), 0);

        let ok: Result<i32, &str> = Result::Ok(4);
        assert_eq!(ok.unwrap_or_else(|_| panic!("must not be called")), 4);
    }

    #[test]
    #[should_panic(expected = "called `unwrap` on an `Err` value: \"boom\"")]
    fn test_unwrap_on_err_panics_with_error() {
        Result::<i32, &str>::Err("boom").unwrap();
    }

    #[test]
    fn test_try_unwrap_carries_error() {
        let err: Result<i32, Failure> = Result::Err(Failure::new("disk full"));
        match err.try_unwrap() {
            Err(Error::UnwrapOnErr { error, .. }) => assert!(error.contains("disk full")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    #[should_panic(expected = "loading settings")]
    fn test_expect_carries_message() {
        Result::<i32, &str>::Err("boom").expect("loading settings");
    }

    #[test]
    fn test_map_or_else_reduces_both_branches() {
        let ok: Result<i32, &str> = Result::Ok(2);
        assert_eq!(ok.map_or_else(|e| e.to_string(), |v| v.to_string()), "2");
        let err: Result<i32, &str> = Result::Err("e");
        assert_eq!(err.map_or_else(|e| e.to_string(), |v| v.to_string()), "e");
    }

    #[test]
    fn test_absent_error_gets_default() {
        let err: Result<i32> = Result::from_error(None);
        assert_eq!(err.unwrap_err(), Failure::default());
        let err: Result<i32> = Result::from_error(Some(Failure::new("x")));
        assert_eq!(err.unwrap_err().message(), "x");
        let wrapped: Result<i32> = Result::wrap(None);
        assert!(wrapped.is_err());
        let wrapped: Result<i32> = Result::wrap(Some(1));
        assert_eq!(wrapped, Result::Ok(1));
    }

    #[test]
    fn test_or() {
        let err: Result<i32, &str> = Result::Err("e");
        assert_eq!(err.or(Result::<i32, ()>::Ok(2)), Result::Ok(2));
        assert_eq!(err.or_else(|e| Result::<i32, usize>::Err(e.len())), Result::Err(1));
        let ok: Result<i32, &str> = Result::Ok(1);
        assert_eq!(ok.or(Result::<i32, ()>::Ok(2)), Result::Ok(1));
    }

    #[test]
    fn test_transpose() {
        let ok_none: Result<Option<i32>, &str> = Result::Ok(Option::None);
        assert_eq!(ok_none.transpose(), Option::None);
        let ok_some: Result<Option<i32>, &str> = Result::Ok(Option::Some(1));
        assert_eq!(ok_some.transpose(), Option::Some(Result::Ok(1)));
        let err: Result<Option<i32>, &str> = Result::Err("e");
        assert_eq!(err.transpose(), Option::Some(Result::Err("e")));
    }

    #[test]
    fn test_eq_by_and_contains() {
        let a: Result<String, &str> = Result::Ok(String::from("Straße"));
        let b: Result<String, &str> = Result::Ok(String::from("STRASSE"));
        assert!(!a.eq_by(&b, &IgnoreCase));
        let c: Result<String, &str> = Result::Ok(String::from("straße"));
        assert!(a.eq_by(&c, &IgnoreCase));
        let e: Result<String, &str> = Result::Err("e");
        assert!(!e.eq_by(&e, &IgnoreCase));
        assert!(a.contains(&"Straße"));
        assert!(!e.contains(&"Straße"));
    }

    #[test]
    fn test_std_conversions() {
        let ours: Result<i32, &str> = StdResult::<i32, &str>::Ok(1).into();
        assert_eq!(ours, Result::Ok(1));
        let theirs: StdResult<i32, &str> = Result::<i32, &str>::Err("e").into();
        assert_eq!(theirs, Err("e"));
        let raw: Result<i32, &str> = 7.into();
        assert_eq!(raw, Result::Ok(7));
    }

    #[test]
    fn test_display() {
        let ok: Result<i32> = Result::Ok(1);
        assert_eq!(ok.to_string(), "Ok(1)");
        let err: Result<i32> = Result::Err(Failure::new("boom"));
        assert_eq!(err.to_string(), "Err(boom)");
    }

    proptest! {
        #[test]
        fn test_map_leaves_err_untouched(res in gen_result(any::<i32>(), "[a-z]{1,8}")) {
            let mapped = res.clone().map(|v| i64::from(v) + 1);
            prop_assert_eq!(mapped.is_ok(), res.is_ok());
            prop_assert_eq!(mapped.err(), res.clone().err());
        }

        #[test]
        fn test_std_roundtrip(res in gen_result(any::<i32>(), any::<u8>())) {
            let back: Result<i32, u8> = Result::from(res.into_std());
            prop_assert_eq!(back, res);
        }

        #[test]
        fn test_ok_and_err_are_exclusive(res in gen_result(any::<i32>(), any::<u8>())) {
            prop_assert_ne!(res.ok().is_some(), res.err().is_some());
        }

        #[test]
        fn test_and_then_short_circuits(res in gen_result(any::<i32>(), any::<u8>())) {
            let calls = Cell::new(0);
            let chained = res.and_then(|v| {
                calls.set(calls.get() + 1);
                Result::Ok(v)
            });
            prop_assert_eq!(chained, res);
            prop_assert_eq!(calls.get(), usize::from(res.is_ok()));
        }
    }
}
