//! # Delayed Stream References
//!
//! A stream's own tail is already lazy, which is enough for a stream that
//! refers to itself. Two streams defined in terms of each other need one more
//! level of laziness. SICP's `solve` is the classic case:
//!
//! ```scheme
//! (define (solve f y0 dt)
//!   (define y (integral (delay dy) y0 dt))
//!   (define dy (stream-map f y))
//!   y)
//! ```
//!
//! `integral` receives a [`Delayed`] stream it may only force from inside its
//! own tail, and the `dy` it closes over reads `y` through a [`Deferred`]
//! placeholder that is bound once `y` exists.
//!
//! ## Example
//!
//! ```
//! use sicp_stream::{Deferred, Stream};
//!
//! // a(n + 1) = b(n) + 1, b(n) = 2 * a(n), a(0) = 1
//! let b: Deferred<u64> = Deferred::new();
//! let b_later = b.delayed();
//! let a = Stream::new(1, move || b_later.force().map(|x| x + 1));
//! b.bind(a.map(|x| x * 2))?;
//!
//! assert_eq!(a.take(4).to_vec(), vec![1, 3, 7, 15]);
//! # Ok::<(), sicp_stream::StreamError>(())
//! ```

use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::{Result, StreamError};
use crate::stream::Stream;
use crate::thunk::Thunk;

/// A stream whose construction waits until it is first forced.
///
/// # Scheme equivalent
/// ```scheme
/// (delay <stream-exp>)
/// ```
pub struct Delayed<T> {
    thunk: Rc<Thunk<Stream<T>>>,
}

impl<T> Clone for Delayed<T> {
    fn clone(&self) -> Self {
        Self {
            thunk: Rc::clone(&self.thunk),
        }
    }
}

impl<T: 'static> Delayed<T> {
    #[must_use]
    pub fn new<F>(build: F) -> Self
    where
        F: FnOnce() -> Stream<T> + 'static,
    {
        Self {
            thunk: Rc::new(Thunk::new(build)),
        }
    }

    /// Wraps a stream that is already available.
    #[must_use]
    pub fn ready(stream: Stream<T>) -> Self {
        Self {
            thunk: Rc::new(Thunk::evaluated(stream)),
        }
    }

    /// Builds the stream on first use.
    #[track_caller]
    pub fn force(&self) -> &Stream<T> {
        self.thunk.force()
    }

    pub fn is_forced(&self) -> bool {
        self.thunk.is_evaluated()
    }
}

impl<T: fmt::Debug> fmt::Debug for Delayed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Delayed").field(&self.thunk).finish()
    }
}

/// A shared slot for a stream that is defined after the code referring
/// to it.
///
/// Clones share the slot, so a clone captured by a closure sees the stream
/// bound later through any other clone.
pub struct Deferred<T> {
    slot: Rc<OnceCell<Stream<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Rc::new(OnceCell::new()),
        }
    }

    /// Binds the stream. A slot can be bound only once.
    pub fn bind(&self, stream: Stream<T>) -> Result<()> {
        self.slot
            .set(stream)
            .map_err(|_| StreamError::AlreadyBound)
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn get(&self) -> Result<&Stream<T>> {
        self.slot.get().ok_or(StreamError::UnboundReference)
    }

    /// Returns the bound stream.
    ///
    /// # Panics
    ///
    /// Panics if nothing has been bound yet. Only lazily evaluated code
    /// should force a deferred stream, and by the time it runs the
    /// definition must be complete.
    #[track_caller]
    pub fn force(&self) -> &Stream<T> {
        match self.get() {
            Ok(stream) => stream,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: 'static> Deferred<T> {
    /// A [`Delayed`] view of this slot, resolved on first force.
    pub fn delayed(&self) -> Delayed<T> {
        let slot = self.clone();
        Delayed::new(move || slot.force().clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(stream) => f.debug_tuple("Deferred").field(stream).finish(),
            None => f.write_str("Deferred(<unbound>)"),
        }
    }
}
