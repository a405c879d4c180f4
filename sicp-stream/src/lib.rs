//! # SICP Streams
//!
//! Lazy, memoized streams in the style of SICP section 3.5: a stream is a
//! head plus a promise for the rest, the promise is forced at most once, and
//! a stream may be defined in terms of itself.
//!
//! ## Modules
//!
//! - [`thunk`]: Memoized deferred computations (`delay` / `force`)
//! - [`stream`]: The [`Stream`] type, construction and access
//! - [`combinators`]: `map`, `select`, `add`, `interleave` and friends
//! - [`delayed`]: Extra laziness for mutually recursive stream definitions
//! - [`error`]: [`StreamError`] and the crate's `Result` alias
//!
//! ## Design Principles
//!
//! 1. **Compute once**: every tail is a [`Thunk`]; all clones of a stream share it
//! 2. **Explicit end**: [`Stream::Empty`] is a variant, not a sentinel head
//! 3. **Self-reference without placeholders in user code**: [`Stream::cyclic`]
//!    hands the tail closure the stream being defined
//! 4. **Single-threaded**: nodes are `Rc`-shared, so streams are neither
//!    `Send` nor `Sync`
//!
//! ## Example
//!
//! ```
//! use sicp_stream::Stream;
//!
//! // (define fibs
//! //   (cons-stream 0 (cons-stream 1 (add-streams (stream-cdr fibs) fibs))))
//! let fibs = Stream::cyclic(0u64, |fibs| {
//!     Stream::new(1, move || {
//!         Stream::add([fibs.drop(1), fibs])
//!     })
//! });
//!
//! assert_eq!(fibs.take(8).to_vec(), vec![0, 1, 1, 2, 3, 5, 8, 13]);
//! ```

pub mod combinators;
pub mod delayed;
pub mod error;
pub mod stream;
pub mod thunk;

pub use delayed::{Deferred, Delayed};
pub use error::{Result, StreamError};
pub use stream::{Cons, Iter, Stream};
pub use thunk::Thunk;
