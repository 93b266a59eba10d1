/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Optional values.
//!
//! [`Option<T>`] is either `Some(value)` or `None`. A `Some` can never
//! hold an absent value: absence of a raw value is expressed as
//! `std::option::Option::None`, and the constructors either demote it
//! to `None` ([`Option::wrap`]) or reject it ([`Option::try_some`]).
//!
//! ```
//! use nullsafe::Option;
//!
//! let port = Option::Some(8080).filter(|p| *p > 1024).map(|p| p + 1);
//! assert_eq!(port.unwrap(), 8081);
//!
//! let missing = Option::<u16>::wrap(None);
//! assert!(missing.is_none());
//! assert_eq!(missing.unwrap_or(80), 80);
//! ```

use std::fmt;
use std::option::Option as StdOption;
use std::result::Result as StdResult;

use crate::compare::EqualityStrategy;
use crate::error::Error;
use crate::result::Result;

/// Presence (`Some`) or absence (`None`) of a value.
///
/// Equality compares through the wrapped value: two options are equal
/// iff both are `None`, or both are `Some` with equal values. To
/// compare against a raw value, use [`Option::contains`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[must_use]
pub enum Option<T> {
    /// No value.
    None,
    /// Some value of type `T`.
    Some(T),
}

impl<T> Option<T> {
    /// Constructs a `Some`.
    pub fn some(value: T) -> Self {
        Self::Some(value)
    }

    /// Constructs a `None`.
    pub fn none() -> Self {
        Self::None
    }

    /// Demotes an absent value to `None`; otherwise `Some`.
    pub fn wrap(value: StdOption<T>) -> Self {
        match value {
            StdOption::Some(value) => Self::Some(value),
            StdOption::None => Self::None,
        }
    }

    /// Constructs a `Some`, failing with [`Error::InvalidArgument`] if
    /// `value` is absent.
    pub fn try_some(value: StdOption<T>) -> StdResult<Self, Error> {
        match value {
            StdOption::Some(value) => Ok(Self::Some(value)),
            StdOption::None => Err(Error::InvalidArgument {
                reason: "cannot construct `Some` from an absent value".into(),
            }),
        }
    }

    /// Converts into the standard library's `Option`.
    pub fn into_std(self) -> StdOption<T> {
        match self {
            Self::Some(value) => StdOption::Some(value),
            Self::None => StdOption::None,
        }
    }

    /// Returns true if this is a `Some`.
    pub fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Returns true if this is a `Some` whose value satisfies `f`.
    pub fn is_some_and(self, f: impl FnOnce(T) -> bool) -> bool {
        match self {
            Self::Some(value) => f(value),
            Self::None => false,
        }
    }

    /// Returns true if this is a `None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Converts from `&Option<T>` to `Option<&T>`.
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Some(value) => Option::Some(value),
            Self::None => Option::None,
        }
    }

    /// Converts from `&mut Option<T>` to `Option<&mut T>`.
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Some(value) => Option::Some(value),
            Self::None => Option::None,
        }
    }

    /// Maps the wrapped value with `f`. `f` is not invoked on `None`.
    ///
    /// To let `f` report absence, use [`Option::and_then`] with
    /// [`Option::wrap`].
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Option<U> {
        match self {
            Self::Some(value) => Option::Some(f(value)),
            Self::None => Option::None,
        }
    }

    /// Applies `f` to the wrapped value, or returns `default`.
    pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
        match self {
            Self::Some(value) => f(value),
            Self::None => default,
        }
    }

    /// Applies `f` to the wrapped value, or computes a default.
    pub fn map_or_else<U>(self, default: impl FnOnce() -> U, f: impl FnOnce(T) -> U) -> U {
        match self {
            Self::Some(value) => f(value),
            Self::None => default(),
        }
    }

    /// Returns `other` if this is a `Some`, else `None`. `other` is
    /// evaluated eagerly.
    pub fn and<U>(self, other: Option<U>) -> Option<U> {
        match self {
            Self::Some(_) => other,
            Self::None => Option::None,
        }
    }

    /// Flat-map: `None` short-circuits without invoking `f`.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Option<U>) -> Option<U> {
        match self {
            Self::Some(value) => f(value),
            Self::None => Option::None,
        }
    }

    /// Returns this option if it is a `Some`, otherwise `other`.
    pub fn or(self, other: Option<T>) -> Option<T> {
        match self {
            Self::Some(_) => self,
            Self::None => other,
        }
    }

    /// Returns this option if it is a `Some`, otherwise calls `f`.
    pub fn or_else(self, f: impl FnOnce() -> Option<T>) -> Option<T> {
        match self {
            Self::Some(_) => self,
            Self::None => f(),
        }
    }

    /// Keeps a `Some` only if `predicate` holds for its value.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
        match self {
            Self::Some(value) => {
                if predicate(&value) {
                    Self::Some(value)
                } else {
                    Self::None
                }
            }
            Self::None => Self::None,
        }
    }

    /// `Some` iff exactly one of `self` and `other` is `Some`.
    pub fn xor(self, other: Option<T>) -> Option<T> {
        match (self, other) {
            (Self::Some(value), Self::None) | (Self::None, Self::Some(value)) => Self::Some(value),
            _ => Self::None,
        }
    }

    /// Returns the wrapped value, or [`Error::EmptyValue`].
    pub fn try_unwrap(self) -> StdResult<T, Error> {
        match self {
            Self::Some(value) => Ok(value),
            Self::None => Err(Error::empty_value()),
        }
    }

    /// Returns the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::EmptyValue`] if this is a `None`.
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.try_unwrap() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Returns the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics with [`Error::EmptyValue`] carrying `message` if this is a
    /// `None`.
    #[track_caller]
    pub fn expect(self, message: &str) -> T {
        self.expect_with(|| message.to_string())
    }

    /// Like [`Option::expect`], but the message is only built on
    /// failure.
    #[track_caller]
    pub fn expect_with(self, message: impl FnOnce() -> String) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => panic!(
                "{}",
                Error::EmptyValue {
                    message: message().into(),
                }
            ),
        }
    }

    /// Returns the wrapped value or `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => default,
        }
    }

    /// Returns the wrapped value or computes one with `f`; `f` is only
    /// called on `None`.
    pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => f(),
        }
    }

    /// Returns the wrapped value or `T::default()`.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    /// Converts to a [`Result`], using `err` for `None`.
    pub fn ok_or<E>(self, err: E) -> Result<T, E> {
        match self {
            Self::Some(value) => Result::Ok(value),
            Self::None => Result::Err(err),
        }
    }

    /// Converts to a [`Result`], calling `err` only for `None`.
    pub fn ok_or_else<E>(self, err: impl FnOnce() -> E) -> Result<T, E> {
        match self {
            Self::Some(value) => Result::Ok(value),
            Self::None => Result::Err(err()),
        }
    }

    /// If `None`, stores `value` and returns a reference to it; if
    /// `Some`, returns the existing value.
    ///
    /// Fails with [`Error::InvalidArgument`] when `value` is absent,
    /// even if the receiver is already `Some`. The receiver is left
    /// untouched on failure.
    pub fn get_or_insert(&mut self, value: impl Into<StdOption<T>>) -> StdResult<&mut T, Error> {
        let StdOption::Some(value) = value.into() else {
            return Err(Error::InvalidArgument {
                reason: "cannot insert an absent value".into(),
            });
        };
        if let Self::None = self {
            *self = Self::Some(value);
        }
        match self {
            Self::Some(value) => Ok(value),
            Self::None => unreachable!("populated above"),
        }
    }

    /// If `None`, stores the value produced by `f` and returns a
    /// reference to it; if `Some`, returns the existing value without
    /// calling `f`.
    ///
    /// Fails with [`Error::InvalidArgument`] when `f` produces an
    /// absent value; the receiver then stays `None`.
    pub fn get_or_insert_with(
        &mut self,
        f: impl FnOnce() -> StdOption<T>,
    ) -> StdResult<&mut T, Error> {
        if let Self::None = self {
            match f() {
                StdOption::Some(value) => *self = Self::Some(value),
                StdOption::None => {
                    return Err(Error::InvalidArgument {
                        reason: "callback produced an absent value".into(),
                    });
                }
            }
        }
        match self {
            Self::Some(value) => Ok(value),
            Self::None => unreachable!("populated above"),
        }
    }

    /// Sets the receiver to `Some(value)`, or `None` if `value` is
    /// absent, and returns the previous state.
    pub fn replace(&mut self, value: impl Into<StdOption<T>>) -> Option<T> {
        std::mem::replace(self, Self::wrap(value.into()))
    }

    /// Moves the current state out, leaving `None` in its place.
    pub fn take(&mut self) -> Option<T> {
        std::mem::replace(self, Self::None)
    }

    /// Returns true if this is a `Some` whose value equals `value`.
    /// `None` is never equal to a raw value.
    pub fn contains<U>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Self::Some(wrapped) => wrapped == value,
            Self::None => false,
        }
    }

    /// Compares through the wrapped values using `strategy`.
    pub fn eq_by<S: EqualityStrategy<T>>(&self, other: &Option<T>, strategy: &S) -> bool {
        match (self, other) {
            (Self::Some(a), Self::Some(b)) => strategy.equivalent(a, b),
            (Self::None, Self::None) => true,
            _ => false,
        }
    }

    /// Like [`Option::contains`] but using `strategy`.
    pub fn contains_by<S: EqualityStrategy<T>>(&self, value: &T, strategy: &S) -> bool {
        match self {
            Self::Some(wrapped) => strategy.equivalent(wrapped, value),
            Self::None => false,
        }
    }

    /// An iterator over the wrapped value (zero or one item).
    pub fn iter(&self) -> std::option::IntoIter<&T> {
        self.as_ref().into_std().into_iter()
    }
}

impl<T> Option<Option<T>> {
    /// Removes one level of nesting.
    pub fn flatten(self) -> Option<T> {
        match self {
            Self::Some(inner) => inner,
            Self::None => Option::None,
        }
    }
}

impl<T, E> Option<Result<T, E>> {
    /// Transposes an option of a result into a result of an option.
    ///
    /// `None` becomes `Ok(None)`; `Some(Ok(v))` and `Some(Err(e))`
    /// become `Ok(Some(v))` and `Err(e)`.
    pub fn transpose(self) -> Result<Option<T>, E> {
        match self {
            Self::None => Result::Ok(Option::None),
            Self::Some(Result::Ok(value)) => Result::Ok(Option::Some(value)),
            Self::Some(Result::Err(err)) => Result::Err(err),
        }
    }
}

impl<T> Default for Option<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> From<T> for Option<T> {
    fn from(value: T) -> Self {
        Self::Some(value)
    }
}

impl<T> From<Option<T>> for StdOption<T> {
    fn from(option: Option<T>) -> Self {
        option.into_std()
    }
}

impl<T> IntoIterator for Option<T> {
    type Item = T;
    type IntoIter = std::option::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_std().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Option<T> {
    type Item = &'a T;
    type IntoIter = std::option::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Option<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Some(value) => write!(f, "Some({})", value),
            Self::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;
    use crate::compare::IgnoreAsciiCase;
    use crate::strategy::gen_option;

    #[test]
    fn test_some_unwrap() {
        assert_eq!(Option::Some(7).unwrap(), 7);
        assert_eq!(Option::some("x").try_unwrap(), Ok("x"));
    }

    #[test]
    #[should_panic(expected = "called `unwrap` on a `None` value")]
    fn test_none_unwrap_panics() {
        Option::<i32>::None.unwrap();
    }

    #[test]
    fn test_none_try_unwrap_is_empty_value() {
        assert!(matches!(
            Option::<i32>::none().try_unwrap(),
            Err(Error::EmptyValue { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "config key missing")]
    fn test_expect_carries_message() {
        Option::<i32>::None.expect("config key missing");
    }

    #[test]
    fn test_expect_with_is_lazy() {
        let called = Cell::new(false);
        let value = Option::Some(1).expect_with(|| {
            called.set(true);
            String::from("unused")
        });
        assert_eq!(value, 1);
        assert!(!called.get());
    }

    #[test]
    fn test_wrap_and_try_some() {
        assert_eq!(Option::wrap(Some(3)), Option::Some(3));
        assert_eq!(Option::<i32>::wrap(None), Option::None);
        assert_eq!(Option::try_some(Some(3)), Ok(Option::Some(3)));
        assert!(matches!(
            Option::<i32>::try_some(None),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_map_skips_none() {
        let calls = Cell::new(0);
        let mapped = Option::<i32>::None.map(|x| {
            calls.set(calls.get() + 1);
            x * 2
        });
        assert!(mapped.is_none());
        assert_eq!(calls.get(), 0);
        assert_eq!(Option::Some(4).map(|x| x * 2), Option::Some(8));
    }

    #[test]
    fn test_map_absence_through_and_then() {
        let parse = |s: &str| Option::wrap(s.parse::<i32>().ok());
        assert_eq!(Option::Some("12").and_then(parse), Option::Some(12));
        assert_eq!(Option::Some("twelve").and_then(parse), Option::None);
    }

    #[test]
    fn test_and_ignores_other_when_none() {
        assert_eq!(Option::Some(1).and(Option::Some("b")), Option::Some("b"));
        assert_eq!(Option::Some(1).and(Option::<&str>::None), Option::None);
        assert_eq!(Option::<i32>::None.and(Option::Some("b")), Option::None);
    }

    #[test]
    fn test_or() {
        assert_eq!(Option::Some(1).or(Option::Some(2)), Option::Some(1));
        assert_eq!(Option::None.or(Option::Some(2)), Option::Some(2));
        assert_eq!(Option::None.or_else(|| Option::Some(3)), Option::Some(3));
    }

    #[test]
    fn test_filter() {
        assert_eq!(Option::Some(4).filter(|x| x % 2 == 0), Option::Some(4));
        assert_eq!(Option::Some(3).filter(|x| x % 2 == 0), Option::None);
        assert_eq!(Option::<i32>::None.filter(|_| true), Option::None);
    }

    #[test]
    fn test_xor() {
        assert!(Option::Some(1).xor(Option::Some(2)).is_none());
        assert_eq!(Option::Some(1).xor(Option::None).unwrap(), 1);
        assert_eq!(Option::None.xor(Option::Some(2)).unwrap(), 2);
        assert!(Option::<i32>::None.xor(Option::None).is_none());
    }

    #[test]
    fn test_unwrap_or_else_is_lazy() {
        let called = Cell::new(false);
        let value = Option::Some(5).unwrap_or_else(|| {
            called.set(true);
            0
        });
        assert_eq!(value, 5);
        assert!(!called.get());
        assert_eq!(Option::<i32>::None.unwrap_or_else(|| 9), 9);
        assert_eq!(Option::<Vec<i32>>::None.unwrap_or_default(), Vec::<i32>::new());
    }

    #[test]
    fn test_ok_or() {
        assert_eq!(Option::Some(1).ok_or("e"), Result::Ok(1));
        assert_eq!(Option::<i32>::None.ok_or("e"), Result::Err("e"));
        let called = Cell::new(false);
        let _ = Option::Some(1).ok_or_else(|| {
            called.set(true);
            "e"
        });
        assert!(!called.get());
    }

    #[test]
    fn test_get_or_insert() {
        let mut opt: Option<i32> = Option::None;
        assert_eq!(*opt.get_or_insert(5).unwrap(), 5);
        assert_eq!(opt, Option::Some(5));
        assert_eq!(*opt.get_or_insert(6).unwrap(), 5);
        *opt.get_or_insert(7).unwrap() += 1;
        assert_eq!(opt, Option::Some(6));
    }

    #[test]
    fn test_get_or_insert_absent_fails() {
        let mut opt = Option::<i32>::None;
        assert!(matches!(
            opt.get_or_insert(None::<i32>),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(opt.is_none());
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut opt: Option<i32> = Option::Some(1);
        let value = opt
            .get_or_insert_with(|| panic!("must not be called"))
            .unwrap();
        assert_eq!(*value, 1);

        let mut opt: Option<i32> = Option::None;
        assert_eq!(*opt.get_or_insert_with(|| Some(2)).unwrap(), 2);
        assert_eq!(opt, Option::Some(2));
    }

    #[test]
    fn test_get_or_insert_with_absent_leaves_none() {
        let mut opt = Option::<String>::None;
        assert!(matches!(
            opt.get_or_insert_with(|| None),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(opt.is_none());
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut opt: Option<i32> = Option::Some(1);
        assert_eq!(opt.replace(2), Option::Some(1));
        assert_eq!(opt, Option::Some(2));
        assert_eq!(opt.replace(None::<i32>), Option::Some(2));
        assert!(opt.is_none());
        assert_eq!(opt.replace(3), Option::None);
        assert_eq!(opt, Option::Some(3));
    }

    #[test]
    fn test_take() {
        let mut opt = Option::Some("v");
        assert_eq!(opt.take(), Option::Some("v"));
        assert!(opt.is_none());
        assert_eq!(opt.take(), Option::None);
    }

    #[test]
    fn test_equality_through_value() {
        assert_eq!(Option::Some(1), Option::Some(1));
        assert_ne!(Option::Some(1), Option::Some(2));
        assert_ne!(Option::Some(1), Option::None);
        assert_eq!(Option::<i32>::None, Option::None);
        assert!(Option::Some(1).contains(&1));
        assert!(!Option::<i32>::None.contains(&1));
        assert!(Option::Some(String::from("a")).contains(&"a"));
    }

    #[test]
    fn test_eq_by_strategy() {
        let a = Option::Some(String::from("Hello"));
        let b = Option::Some(String::from("HELLO"));
        assert!(a.eq_by(&b, &IgnoreAsciiCase));
        assert!(!a.eq_by(&Option::None, &IgnoreAsciiCase));
        assert!(Option::<String>::None.eq_by(&Option::None, &IgnoreAsciiCase));
        assert!(!Option::<String>::None.contains_by(&String::from("x"), &IgnoreAsciiCase));
    }

    #[test]
    fn test_transpose() {
        let none: Option<Result<i32, &str>> = Option::None;
        assert_eq!(none.transpose(), Result::Ok(Option::None));
        assert_eq!(
            Option::Some(Result::<i32, &str>::Ok(1)).transpose(),
            Result::Ok(Option::Some(1))
        );
        assert_eq!(
            Option::Some(Result::<i32, &str>::Err("e")).transpose(),
            Result::Err("e")
        );
    }

    #[test]
    fn test_conversions() {
        let opt: Option<i32> = 5.into();
        assert_eq!(opt, Option::Some(5));
        let plain: StdOption<i32> = opt.into();
        assert_eq!(plain, Some(5));
        assert_eq!(Option::Some(Option::Some(1)).flatten(), Option::Some(1));
        assert_eq!(Option::Some(3).into_iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(Option::<i32>::default(), Option::None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Option::Some(3).to_string(), "Some(3)");
        assert_eq!(Option::<i32>::None.to_string(), "None");
    }

    proptest! {
        #[test]
        fn test_map_preserves_presence(opt in gen_option(any::<i32>())) {
            let mapped = opt.map(|v| i64::from(v) * 2);
            prop_assert_eq!(mapped.is_some(), opt.is_some());
            prop_assert_eq!(mapped.into_std(), opt.into_std().map(|v| i64::from(v) * 2));
        }

        #[test]
        fn test_wrap_into_std_roundtrip(opt in gen_option(any::<i32>())) {
            prop_assert_eq!(Option::wrap(opt.into_std()), opt);
        }

        #[test]
        fn test_ok_or_then_ok(opt in gen_option(any::<i32>())) {
            prop_assert_eq!(opt.ok_or("absent").ok(), opt);
        }

        #[test]
        fn test_xor_has_at_most_one_side(
            a in gen_option(any::<u8>()),
            b in gen_option(any::<u8>()),
        ) {
            let x = a.xor(b);
            prop_assert_eq!(x.is_some(), a.is_some() != b.is_some());
        }

        #[test]
        fn test_and_then_identity(opt in gen_option(any::<i32>())) {
            prop_assert_eq!(opt.and_then(Option::Some), opt);
        }
    }
}
