/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Deferred, memoizing sequences.
//!
//! A [`LazyArray<T>`] wraps a one-shot pull source and evaluates it
//! at most once. Its lifetime has two phases:
//!
//! ```text
//! Unevaluated { buffer, cursor } ──(source exhausted)──▶ Evaluated { items }
//! ```
//!
//! The transition is one-way. It happens when the length or an
//! element is demanded (the rest of the source is drained), or when
//! an enumeration reaches the end of the source.
//!
//! # Interleaved enumeration
//!
//! Any number of [`Iter`]s may be live at once. Each one first replays
//! the memoized buffer, in order, and only then pulls from the cursor.
//! A pulled item is appended to the buffer *before* it is yielded, so
//! another iterator never observes an item that was not recorded.
//!
//! ```
//! use nullsafe::LazyArray;
//!
//! let array = LazyArray::from_source((1..=3).map(|x| x * 10));
//! let mut first = array.iter();
//! let mut second = array.iter();
//! assert_eq!(first.next(), Some(10));
//! assert_eq!(second.next(), Some(10)); // replayed, not pulled again
//! assert_eq!(array.memoized(), 1);
//! assert_eq!(array.len(), 3); // drains the rest
//! assert_eq!(first.collect::<Vec<_>>(), vec![20, 30]);
//! ```
//!
//! # Reentrancy
//!
//! Evaluation is not reentrant. A source that accesses the array it
//! feeds panics instead of corrupting the buffer. `LazyArray` is
//! neither `Send` nor `Sync`.

use std::cell::OnceCell;
use std::cell::RefCell;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;
use std::ops::IndexMut;

use crate::config;
use crate::error::Error;

/// Cursor over a one-shot pull source.
///
/// The source is either already active, or deferred behind a
/// generator that is invoked on the first pull. Once the source
/// reports exhaustion it is dropped and never polled again.
///
/// If the generator panics the cursor is poisoned: every later pull
/// panics rather than reporting an empty source.
pub struct PullCursor<T> {
    state: CursorState<T>,
}

enum CursorState<T> {
    Deferred(Box<dyn FnOnce() -> Box<dyn Iterator<Item = T>>>),
    Active(Box<dyn Iterator<Item = T>>),
    // The generator panicked; it was consumed and cannot be retried.
    Poisoned,
    Exhausted,
}

impl<T> PullCursor<T> {
    /// A cursor over an existing source.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            state: CursorState::Active(Box::new(source.into_iter())),
        }
    }

    /// A cursor whose source is produced by `generator` on first pull.
    /// `generator` is called at most once.
    pub fn deferred<F, I>(generator: F) -> Self
    where
        F: FnOnce() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            state: CursorState::Deferred(Box::new(move || {
                Box::new(generator().into_iter()) as Box<dyn Iterator<Item = T>>
            })),
        }
    }

    /// Pulls the next item from the source.
    ///
    /// # Panics
    ///
    /// Panics if the deferred generator panicked on an earlier pull.
    #[track_caller]
    pub fn pull(&mut self) -> Option<T> {
        loop {
            match &mut self.state {
                CursorState::Deferred(_) => {
                    let CursorState::Deferred(generator) =
                        std::mem::replace(&mut self.state, CursorState::Poisoned)
                    else {
                        unreachable!("matched above");
                    };
                    self.state = CursorState::Active(generator());
                }
                CursorState::Poisoned => {
                    panic!("lazy source generator panicked on an earlier pull")
                }
                CursorState::Active(source) => match source.next() {
                    Some(item) => return Some(item),
                    None => {
                        self.state = CursorState::Exhausted;
                        return None;
                    }
                },
                CursorState::Exhausted => return None,
            }
        }
    }

    /// Whether the source has reported exhaustion.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }
}

impl<T> fmt::Debug for PullCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            CursorState::Deferred(_) => "deferred",
            CursorState::Active(_) => "active",
            CursorState::Poisoned => "poisoned",
            CursorState::Exhausted => "exhausted",
        };
        f.debug_struct("PullCursor").field("state", &state).finish()
    }
}

/// The unevaluated phase: items drawn so far, and the rest of the
/// source.
struct Pending<T> {
    buffer: Vec<T>,
    cursor: PullCursor<T>,
}

/// A sequence whose source is evaluated at most once.
///
/// Exactly one of `items` (evaluated) and `pending` (unevaluated) is
/// populated at any time outside of a call into this type.
pub struct LazyArray<T> {
    items: OnceCell<Box<[T]>>,
    pending: RefCell<Option<Pending<T>>>,
}

impl<T> LazyArray<T> {
    /// An evaluated, empty array.
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// An evaluated array holding a copy of `items`.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from(items.to_vec())
    }

    /// An unevaluated array drawing from `source`.
    ///
    /// The source is drained on demand even when it is already
    /// materialized, e.g. a `Vec`. Use `LazyArray::from(vec)` to start
    /// out evaluated.
    pub fn from_source<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_cursor(PullCursor::new(source))
    }

    /// An unevaluated array whose source is produced by `generator`
    /// on first demand.
    pub fn from_generator<F, I>(generator: F) -> Self
    where
        F: FnOnce() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_cursor(PullCursor::deferred(generator))
    }

    /// An unevaluated array drawing from `cursor`.
    pub fn from_cursor(cursor: PullCursor<T>) -> Self {
        let buffer = Vec::with_capacity(config::get().memo_capacity);
        Self {
            items: OnceCell::new(),
            pending: RefCell::new(Some(Pending { buffer, cursor })),
        }
    }

    /// Whether the source has been fully drawn.
    pub fn is_evaluated(&self) -> bool {
        self.items.get().is_some()
    }

    /// The number of items produced so far, without pulling any more.
    pub fn memoized(&self) -> usize {
        match self.items.get() {
            Some(items) => items.len(),
            None => self
                .pending
                .borrow()
                .as_ref()
                .map_or(0, |pending| pending.buffer.len()),
        }
    }

    /// Evaluates the array and returns its items.
    pub fn as_slice(&self) -> &[T] {
        self.items.get_or_init(|| {
            let mut slot = self.pending.borrow_mut();
            let Some(pending) = slot.as_mut() else {
                unreachable!("lazy array has neither items nor a source");
            };
            let memoized = pending.buffer.len();
            while let Some(item) = pending.cursor.pull() {
                tracing::trace!(index = pending.buffer.len(), "pulled item from lazy source");
                pending.buffer.push(item);
            }
            let Some(Pending { buffer, .. }) = slot.take() else {
                unreachable!("checked above");
            };
            tracing::debug!(
                len = buffer.len(),
                memoized,
                "lazy array evaluated by forcing"
            );
            buffer.into_boxed_slice()
        })
    }

    /// The number of items. Evaluates the array.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the array has no items. Evaluates the array.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The item at `index`. Evaluates the array, then fails with
    /// [`Error::IndexOutOfRange`] outside `[0, len)`.
    pub fn get(&self, index: usize) -> Result<&T, Error> {
        let items = self.as_slice();
        items.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    /// Evaluates the array and returns its items for in-place
    /// mutation.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_slice();
        match self.items.get_mut() {
            Some(items) => items,
            None => unreachable!("evaluated above"),
        }
    }

    /// Mutable access to the item at `index`. Evaluates the array,
    /// then fails with [`Error::IndexOutOfRange`] outside `[0, len)`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let items = self.as_mut_slice();
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Evaluates the array and clones its items into
    /// `dest[offset..offset + len]`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if the items do not fit;
    /// `dest` is left untouched in that case.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), Error>
    where
        T: Clone,
    {
        let items = self.as_slice();
        let end = offset.saturating_add(items.len());
        if end > dest.len() {
            return Err(Error::IndexOutOfRange {
                index: end,
                len: dest.len(),
            });
        }
        dest[offset..end].clone_from_slice(items);
        Ok(())
    }

    /// An iterator that replays memoized items and pulls the rest on
    /// demand.
    pub fn iter(&self) -> Iter<'_, T>
    where
        T: Clone,
    {
        Iter {
            array: self,
            position: 0,
        }
    }

    /// Evaluates the array and returns a copy of its items.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Evaluates the array and returns its items.
    pub fn into_vec(self) -> Vec<T> {
        self.as_slice();
        self.items
            .into_inner()
            .map(<[T]>::into_vec)
            .unwrap_or_default()
    }

    /// The item at `index`, pulling from the source as needed.
    fn fetch(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        if let Some(items) = self.items.get() {
            return items.get(index).cloned();
        }

        let mut slot = self.pending.borrow_mut();
        let Some(pending) = slot.as_mut() else {
            unreachable!("lazy array has neither items nor a source");
        };
        while pending.buffer.len() <= index {
            match pending.cursor.pull() {
                Some(item) => {
                    tracing::trace!(index = pending.buffer.len(), "pulled item from lazy source");
                    // Record before yielding.
                    pending.buffer.push(item);
                }
                None => {
                    let Some(Pending { buffer, .. }) = slot.take() else {
                        unreachable!("checked above");
                    };
                    drop(slot);
                    tracing::debug!(len = buffer.len(), "lazy array evaluated by enumeration");
                    let items = self.items.get_or_init(|| buffer.into_boxed_slice());
                    return items.get(index).cloned();
                }
            }
        }
        Some(pending.buffer[index].clone())
    }
}

impl<T> From<Vec<T>> for LazyArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: OnceCell::from(items.into_boxed_slice()),
            pending: RefCell::new(None),
        }
    }
}

impl<T> Default for LazyArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<usize> for LazyArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for LazyArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a LazyArray<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(items) = self.items.get() {
            return f
                .debug_struct("LazyArray")
                .field("evaluated", &true)
                .field("items", items)
                .finish();
        }
        let mut out = f.debug_struct("LazyArray");
        out.field("evaluated", &false);
        match self.pending.try_borrow() {
            Ok(slot) => match slot.as_ref() {
                Some(pending) => out
                    .field("memoized", &pending.buffer)
                    .field("cursor", &pending.cursor),
                None => &mut out,
            },
            Err(_) => out.field("memoized", &"<evaluating>"),
        };
        out.finish()
    }
}

/// Iterator over a [`LazyArray`], created by [`LazyArray::iter`].
///
/// Yields clones of the items. Restartable: a fresh iterator over an
/// evaluated array replays the items without touching the source.
pub struct Iter<'a, T> {
    array: &'a LazyArray<T>,
    position: usize,
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.array.fetch(self.position)?;
        self.position += 1;
        Some(item)
    }
}

impl<T: Clone> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("position", &self.position)
            .finish()
    }
}
