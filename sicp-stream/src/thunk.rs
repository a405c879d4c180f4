//! # Memoized Thunks
//!
//! Scheme's `delay` produces a promise and `force` evaluates it. SICP's
//! `memo-proc` makes the promise remember its value, so that a stream tail
//! is computed once no matter how many holders look at it.
//!
//! [`Thunk`] is that memoized promise. The value lives in a
//! [`OnceCell`], which hands out `&T` for as long as the thunk lives and
//! never needs a runtime borrow flag.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use sicp_stream::thunk::Thunk;
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&runs);
//! let thunk = Thunk::new(move || {
//!     counter.set(counter.get() + 1);
//!     6 * 7
//! });
//!
//! assert!(!thunk.is_evaluated());
//! assert_eq!(*thunk.force(), 42);
//! assert_eq!(*thunk.force(), 42);
//! assert_eq!(runs.get(), 1);
//! ```

use std::cell::Cell;
use std::fmt;

use log::trace;
use once_cell::unsync::OnceCell;

use crate::error::{Result, StreamError};

type Computation<T> = Box<dyn FnOnce() -> T>;

/// A deferred computation that runs at most once.
///
/// # Scheme equivalent
/// ```scheme
/// (memo-proc (lambda () <exp>))
/// ```
pub struct Thunk<T> {
    value: OnceCell<T>,
    /// `Some` until the computation starts. Empty together with an empty
    /// `value` means the computation is running (or panicked).
    pending: Cell<Option<Computation<T>>>,
}

impl<T> Thunk<T> {
    /// Wraps `compute` without running it.
    #[must_use]
    pub fn new<F>(compute: F) -> Self
    where
        F: FnOnce() -> T + 'static,
    {
        Self {
            value: OnceCell::new(),
            pending: Cell::new(Some(Box::new(compute))),
        }
    }

    /// A thunk whose value is already known.
    #[must_use]
    pub fn evaluated(value: T) -> Self {
        Self {
            value: OnceCell::from(value),
            pending: Cell::new(None),
        }
    }

    /// Forces the thunk, reporting a reentrant force as an error.
    ///
    /// The first call runs the computation and caches its result; every
    /// later call returns the cache.
    pub fn try_force(&self) -> Result<&T> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let compute = self.pending.take().ok_or(StreamError::ReentrantForce)?;
        trace!("forcing delayed computation");
        let value = compute();
        Ok(self.value.get_or_init(|| value))
    }

    /// Forces the thunk.
    ///
    /// # Panics
    ///
    /// Panics if the thunk is forced from inside its own computation. A
    /// well-formed self-referential stream never does this; one that does
    /// would otherwise recurse forever.
    #[track_caller]
    pub fn force(&self) -> &T {
        match self.try_force() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the cached value without forcing.
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    /// Moves the cached value out, leaving the thunk unevaluated and inert.
    pub fn take_evaluated(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T: fmt::Debug> fmt::Debug for Thunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f.debug_tuple("Thunk").field(value).finish(),
            None => f.write_str("Thunk(<delayed>)"),
        }
    }
}
