//! # Lazy Streams
//!
//! A stream is a cons cell whose `cdr` is a promise. In Scheme:
//!
//! ```scheme
//! (cons-stream a b)  ; => (cons a (delay b))
//! (stream-car s)     ; => (car s)
//! (stream-cdr s)     ; => (force (cdr s))
//! ```
//!
//! [`Stream`] keeps that shape. A non-empty stream is a shared [`Cons`] node
//! holding the head and a memoized [`Thunk`] for the tail; the end of a
//! finite stream is the [`Stream::Empty`] variant, never a node with a
//! sentinel head.
//!
//! Cloning a stream only bumps a reference count, and every clone sees the
//! same memoized tail. Only the prefix somebody actually forced is ever
//! built.
//!
//! ## Example
//!
//! ```
//! use sicp_stream::Stream;
//!
//! fn integers_starting_from(n: u64) -> Stream<u64> {
//!     Stream::new(n, move || integers_starting_from(n + 1))
//! }
//!
//! let integers = integers_starting_from(1);
//! assert_eq!(integers.head(), Ok(&1));
//! assert_eq!(integers.at(9), Ok(&10));
//! assert_eq!(integers.take(5).to_vec(), vec![1, 2, 3, 4, 5]);
//! ```

use std::fmt;
use std::rc::{Rc, Weak};

use log::debug;

use crate::error::{Result, StreamError};
use crate::thunk::Thunk;

/// Forced elements shown by `Debug` before the output is cut short.
const DEBUG_PREFIX_LIMIT: usize = 16;

/// A lazy, memoized, possibly infinite sequence.
pub enum Stream<T> {
    /// The empty stream (`the-empty-stream`).
    Empty,
    /// A head and a delayed tail.
    Cons(Rc<Cons<T>>),
}

/// A stream node: the head is fixed, the tail is computed at most once.
pub struct Cons<T> {
    head: T,
    tail: Thunk<Stream<T>>,
}

impl<T> Cons<T> {
    #[inline]
    pub fn head(&self) -> &T {
        &self.head
    }

    /// Forces the tail.
    #[inline]
    pub fn tail(&self) -> &Stream<T> {
        self.tail.force()
    }

    /// Whether the tail has been forced yet.
    pub fn is_tail_forced(&self) -> bool {
        self.tail.is_evaluated()
    }
}

impl<T> Drop for Cons<T> {
    // A fully forced chain would otherwise be dropped recursively, one stack
    // frame per node.
    fn drop(&mut self) {
        let mut next = self.tail.take_evaluated();
        while let Some(Stream::Cons(node)) = next {
            next = match Rc::try_unwrap(node) {
                Ok(mut cons) => cons.tail.take_evaluated(),
                Err(_) => None,
            };
        }
    }
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Cons(node) => Stream::Cons(Rc::clone(node)),
        }
    }
}

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Stream::Empty
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<T: 'static> Stream<T> {
    /// Builds a stream from a head and a delayed tail.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (cons-stream head tail)
    /// ```
    ///
    /// # Example
    /// ```
    /// use sicp_stream::Stream;
    ///
    /// let s = Stream::new(1, || Stream::new(2, || Stream::empty()));
    /// assert_eq!(s.to_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn new<F>(head: T, tail: F) -> Self
    where
        F: FnOnce() -> Stream<T> + 'static,
    {
        Stream::Cons(Rc::new(Cons {
            head,
            tail: Thunk::new(tail),
        }))
    }

    /// A one-element stream; its tail is already known to be empty.
    #[must_use]
    pub fn singleton(head: T) -> Self {
        Stream::Cons(Rc::new(Cons {
            head,
            tail: Thunk::evaluated(Stream::Empty),
        }))
    }

    /// Builds a stream whose tail is defined in terms of the stream itself.
    ///
    /// The node is allocated first; `tail` receives a handle to it when the
    /// tail is forced, so the definition may refer to its own (already
    /// memoized) prefix.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (define ones (cons-stream 1 ones))
    /// ```
    ///
    /// # Example
    /// ```
    /// use sicp_stream::Stream;
    ///
    /// let ones = Stream::cyclic(1, |ones| ones);
    /// assert_eq!(ones.take(3).to_vec(), vec![1, 1, 1]);
    ///
    /// let integers = Stream::cyclic(1, |integers| Stream::add([ones, integers]));
    /// assert_eq!(integers.take(5).to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    ///
    /// # Memory
    ///
    /// The unforced end of a self-referential stream holds a strong handle
    /// to an earlier node of the same stream, and that node's tail leads
    /// back to it. `Rc` cannot reclaim such a cycle. When the last outside
    /// handle goes away, the forced prefix is freed up to the last few
    /// nodes, and those stay allocated until the process exits. How many
    /// stay depends on how far back the definition reaches: one node for
    /// `ones`, two for a stream built by `map` over itself, three for
    /// `fibs`. Streams built without `cyclic` or [`Deferred`] are freed in
    /// full.
    ///
    /// [`Deferred`]: crate::Deferred
    #[must_use]
    pub fn cyclic<F>(head: T, tail: F) -> Self
    where
        F: FnOnce(Stream<T>) -> Stream<T> + 'static,
    {
        Stream::Cons(Rc::new_cyclic(|this: &Weak<Cons<T>>| {
            let this = Weak::clone(this);
            Cons {
                head,
                // The node is alive for as long as its own tail is being forced.
                tail: Thunk::new(move || tail(this.upgrade().map_or(Stream::Empty, Stream::Cons))),
            }
        }))
    }
}

// ============================================================================
// Access
// ============================================================================

impl<T> Stream<T> {
    #[must_use]
    pub const fn empty() -> Self {
        Stream::Empty
    }

    /// # Scheme equivalent
    /// ```scheme
    /// (stream-null? s)
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Stream::Empty)
    }

    /// Returns the first element.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (stream-car s)
    /// ```
    pub fn head(&self) -> Result<&T> {
        self.as_cons()
            .map(Cons::head)
            .ok_or(StreamError::empty("head"))
    }

    /// Forces and returns the rest of the stream.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (stream-cdr s)
    /// ```
    pub fn tail(&self) -> Result<&Stream<T>> {
        self.as_cons()
            .map(Cons::tail)
            .ok_or(StreamError::empty("tail"))
    }

    /// Returns the element at `index`, forcing `index` tails on the way.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (stream-ref s n)
    /// ```
    ///
    /// # Example
    /// ```
    /// use sicp_stream::{Stream, StreamError};
    ///
    /// let s: Stream<char> = "abc".chars().collect();
    /// assert_eq!(s.at(2), Ok(&'c'));
    /// assert!(matches!(s.at(3), Err(StreamError::EmptyStreamAccess { .. })));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let mut current = self;
        for step in 0..index {
            match current {
                Stream::Cons(node) => current = node.tail(),
                Stream::Empty => {
                    debug!("stream exhausted after {step} elements, wanted index {index}");
                    return Err(StreamError::empty("at"));
                }
            }
        }
        current.as_cons().map(Cons::head).ok_or_else(|| {
            debug!("stream exhausted after {index} elements, wanted index {index}");
            StreamError::empty("at")
        })
    }

    /// Skips `n` elements. Dropping past the end yields the empty stream.
    ///
    /// Unlike [`Stream::take`], this walks the stream eagerly.
    pub fn drop(&self, n: usize) -> Stream<T> {
        let mut current = self;
        for _ in 0..n {
            match current {
                Stream::Cons(node) => current = node.tail(),
                Stream::Empty => break,
            }
        }
        current.clone()
    }

    /// Borrowing iterator that forces one tail per step, and only when the
    /// next element is requested.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            start: Some(self),
            previous: None,
        }
    }

    /// Applies `f` to every element in order.
    ///
    /// Never returns on an infinite stream; bound it with `take` first.
    pub fn each<F>(&self, f: F) -> &Self
    where
        F: FnMut(&T),
    {
        self.iter().for_each(f);
        self
    }

    /// Strict left fold. Never returns on an infinite stream.
    ///
    /// # Example
    /// ```
    /// use sicp_stream::Stream;
    ///
    /// let s = Stream::from(vec![1, 2, 3, 4]);
    /// assert_eq!(s.reduce(0, |acc, x| acc + x), 10);
    /// ```
    pub fn reduce<A, F>(&self, initial: A, f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(initial, f)
    }

    /// Realizes a finite stream.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Prints each element on its own line.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (display-stream s)
    /// ```
    pub fn display(&self)
    where
        T: fmt::Display,
    {
        self.each(|value| println!("{value}"));
    }

    pub(crate) fn as_cons(&self) -> Option<&Cons<T>> {
        match self {
            Stream::Cons(node) => Some(node),
            Stream::Empty => None,
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Returns the first `n` elements as a new finite stream.
    ///
    /// Nothing past the requested prefix is forced, neither now nor when
    /// the result is consumed.
    ///
    /// # Example
    /// ```
    /// use sicp_stream::Stream;
    ///
    /// let ones = Stream::cyclic(1, |ones| ones);
    /// assert!(ones.take(0).is_empty());
    /// assert_eq!(ones.take(2).to_vec(), vec![1, 1]);
    /// ```
    pub fn take(&self, n: usize) -> Stream<T>
    where
        T: Clone,
    {
        match self {
            Stream::Cons(node) if n == 1 => Stream::singleton(node.head().clone()),
            Stream::Cons(node) if n > 1 => {
                let node = Rc::clone(node);
                Stream::new(node.head().clone(), move || node.tail().take(n - 1))
            }
            _ => Stream::Empty,
        }
    }
}

// ============================================================================
// Iteration and conversions
// ============================================================================

/// Iterator over the elements of a [`Stream`], see [`Stream::iter`].
pub struct Iter<'a, T> {
    start: Option<&'a Stream<T>>,
    previous: Option<&'a Cons<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let stream = match (self.start.take(), self.previous) {
            (Some(stream), _) => stream,
            (None, Some(node)) => node.tail(),
            (None, None) => return None,
        };
        self.previous = stream.as_cons();
        self.previous.map(Cons::head)
    }
}

impl<'a, T> IntoIterator for &'a Stream<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects eagerly into a finite stream whose tails are already forced.
/// The source must be finite; an infinite stream is built with [`Stream::new`].
impl<T: 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items.into_iter().rev().fold(Stream::Empty, |tail, head| {
            Stream::Cons(Rc::new(Cons {
                head,
                tail: Thunk::evaluated(tail),
            }))
        })
    }
}

impl<T: 'static> From<Vec<T>> for Stream<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

/// Element-wise equality. Both streams must be finite.
impl<T: PartialEq> PartialEq for Stream<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

/// Shows the forced prefix only; never forces anything.
impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut current = self;
        let mut shown = 0;
        while let Stream::Cons(node) = current {
            if shown == DEBUG_PREFIX_LIMIT {
                return list.finish_non_exhaustive();
            }
            list.entry(node.head());
            shown += 1;
            match node.tail.get() {
                Some(next) => current = next,
                None => return list.finish_non_exhaustive(),
            }
        }
        list.finish()
    }
}
