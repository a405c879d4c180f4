//! # Stream Combinators
//!
//! Lazy counterparts of SICP's list operations: every
//! combinator builds the head of its result right away and leaves the rest
//! behind a memoized tail. Functions passed in are kept behind an `Rc` so
//! that each lazily built tail can share them.
//!
//! ## Example
//!
//! ```
//! use sicp_stream::Stream;
//!
//! fn integers_starting_from(n: i64) -> Stream<i64> {
//!     Stream::new(n, move || integers_starting_from(n + 1))
//! }
//!
//! let evens = integers_starting_from(1).select(|x| x % 2 == 0);
//! let squares = evens.map(|x| x * x);
//! assert_eq!(squares.take(3).to_vec(), vec![4, 16, 36]);
//!
//! let sums = Stream::add([integers_starting_from(1), integers_starting_from(10)]);
//! assert_eq!(sums.take(3).to_vec(), vec![11, 13, 15]);
//! ```

use std::ops::{Add, Mul};
use std::rc::Rc;

use num_traits::{One, Zero};

use crate::stream::Stream;

type Mapper<T, U> = Rc<dyn Fn(&T) -> U>;
type Predicate<T> = Rc<dyn Fn(&T) -> bool>;
type PairMapper<T, U> = Rc<dyn Fn(&T, &T) -> U>;
type Zipper<T, U> = Rc<dyn Fn(&[&T]) -> U>;

impl<T: 'static> Stream<T> {
    /// Applies `f` to each element as it is forced.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (stream-map proc s)
    /// ```
    pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        map_with(self, Rc::new(f))
    }

    /// Keeps the elements satisfying `pred`.
    ///
    /// The non-matching prefix is skipped eagerly, so selecting from an
    /// infinite stream with no further match never returns.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (stream-filter pred s)
    /// ```
    pub fn select<P>(&self, pred: P) -> Stream<T>
    where
        T: Clone,
        P: Fn(&T) -> bool + 'static,
    {
        select_with(self, Rc::new(pred))
    }

    /// # Scheme equivalent
    /// ```scheme
    /// (scale-stream s factor)
    /// ```
    pub fn scale(&self, factor: T) -> Stream<T>
    where
        T: Mul<Output = T> + Clone,
    {
        self.map(move |x| x.clone() * factor.clone())
    }

    /// Running sums starting from zero: the nth element is the sum of the
    /// first n + 1 elements.
    ///
    /// # Example
    /// ```
    /// use sicp_stream::Stream;
    ///
    /// let s = Stream::from(vec![1, 2, 3, 4]);
    /// assert_eq!(s.partial_sums().to_vec(), vec![1, 3, 6, 10]);
    /// ```
    pub fn partial_sums(&self) -> Stream<T>
    where
        T: Zero + Clone,
    {
        self.partial_sums_from(T::zero())
    }

    /// Running sums on top of `initial`.
    pub fn partial_sums_from(&self, initial: T) -> Stream<T>
    where
        T: Add<Output = T> + Clone,
    {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Cons(node) => {
                let sum = initial + node.head().clone();
                let node = Rc::clone(node);
                let running = sum.clone();
                Stream::new(sum, move || node.tail().partial_sums_from(running))
            }
        }
    }

    /// Maps `f` over consecutive, non-overlapping pairs:
    /// `(s0, s1), (s2, s3), ...`. A trailing odd element is ignored.
    ///
    /// # Example
    /// ```
    /// use sicp_stream::Stream;
    ///
    /// let s = Stream::from(vec![1, 2, 3, 4, 5]);
    /// assert_eq!(s.map_successive_pairs(|a, b| a * b).to_vec(), vec![2, 12]);
    /// ```
    pub fn map_successive_pairs<U, F>(&self, f: F) -> Stream<U>
    where
        U: 'static,
        F: Fn(&T, &T) -> U + 'static,
    {
        successive_pairs_with(self, Rc::new(f))
    }

    /// Combines corresponding elements of every operand with `f`.
    ///
    /// The result ends as soon as any operand runs out; zipping no operands
    /// gives the empty stream.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (stream-map proc s1 s2 ...)
    /// ```
    pub fn zip_with<U, I, F>(streams: I, f: F) -> Stream<U>
    where
        U: 'static,
        I: IntoIterator<Item = Stream<T>>,
        F: Fn(&[&T]) -> U + 'static,
    {
        zip_with_rc(streams.into_iter().collect(), Rc::new(f))
    }

    /// Element-wise sum.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (add-streams s1 s2)
    /// ```
    pub fn add<I>(streams: I) -> Stream<T>
    where
        I: IntoIterator<Item = Stream<T>>,
        T: Zero + Clone,
    {
        Stream::zip_with(streams, |values: &[&T]| {
            values
                .iter()
                .fold(T::zero(), |acc, &value| acc + value.clone())
        })
    }

    /// Element-wise product.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (mul-streams s1 s2)
    /// ```
    pub fn mul<I>(streams: I) -> Stream<T>
    where
        I: IntoIterator<Item = Stream<T>>,
        T: One + Clone,
    {
        Stream::zip_with(streams, |values: &[&T]| {
            values
                .iter()
                .fold(T::one(), |acc, &value| acc * value.clone())
        })
    }

    /// Takes the head of `first`, then continues with `second` and the rest
    /// of `first` in swapped roles. Once `first` is exhausted the remainder
    /// of `second` follows unchanged.
    ///
    /// # Scheme equivalent
    /// ```scheme
    /// (define (interleave s1 s2)
    ///   (if (stream-null? s1)
    ///       s2
    ///       (cons-stream (stream-car s1)
    ///                    (interleave s2 (stream-cdr s1)))))
    /// ```
    pub fn interleave(first: &Stream<T>, second: &Stream<T>) -> Stream<T>
    where
        T: Clone,
    {
        match first {
            Stream::Empty => second.clone(),
            Stream::Cons(node) => {
                let node = Rc::clone(node);
                let second = second.clone();
                Stream::new(node.head().clone(), move || {
                    Stream::interleave(&second, node.tail())
                })
            }
        }
    }
}

fn map_with<T: 'static, U: 'static>(stream: &Stream<T>, f: Mapper<T, U>) -> Stream<U> {
    match stream {
        Stream::Empty => Stream::Empty,
        Stream::Cons(node) => {
            let head = f(node.head());
            let node = Rc::clone(node);
            Stream::new(head, move || map_with(node.tail(), f))
        }
    }
}

fn select_with<T: Clone + 'static>(stream: &Stream<T>, pred: Predicate<T>) -> Stream<T> {
    let mut current = stream;
    while let Stream::Cons(node) = current {
        if pred(node.head()) {
            let node = Rc::clone(node);
            return Stream::new(node.head().clone(), move || {
                select_with(node.tail(), pred)
            });
        }
        current = node.tail();
    }
    Stream::Empty
}

fn successive_pairs_with<T: 'static, U: 'static>(
    stream: &Stream<T>,
    f: PairMapper<T, U>,
) -> Stream<U> {
    let Stream::Cons(first) = stream else {
        return Stream::Empty;
    };
    let Stream::Cons(second) = first.tail() else {
        return Stream::Empty;
    };
    let head = f(first.head(), second.head());
    let second = Rc::clone(second);
    Stream::new(head, move || successive_pairs_with(second.tail(), f))
}

fn zip_with_rc<T: 'static, U: 'static>(streams: Vec<Stream<T>>, f: Zipper<T, U>) -> Stream<U> {
    let head = {
        let heads: Option<Vec<&T>> = streams.iter().map(|s| s.head().ok()).collect();
        match heads {
            Some(heads) if !heads.is_empty() => f(heads.as_slice()),
            _ => return Stream::Empty,
        }
    };
    Stream::new(head, move || {
        let tails = streams
            .iter()
            .filter_map(|s| s.tail().ok())
            .cloned()
            .collect();
        zip_with_rc(tails, f)
    })
}
