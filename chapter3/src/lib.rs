//! SICP Chapter 3.5: Streams
//!
//! Streams as delayed lists, built on the memoized `sicp_stream::Stream`:
//! - Delayed lists and lazy intervals (3.5.1)
//! - Infinite and implicitly defined streams (3.5.2)
//! - Iterative improvement, series acceleration and pairs (3.5.3)
//! - Integrators and delayed arguments (3.5.4)
//! - Monte Carlo estimation without assignment (3.5.5)

// Modules
pub mod section_3_5; // Streams
