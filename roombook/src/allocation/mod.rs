//! Room allocation: the availability finder, the next-availability
//! estimator, and the booking allocator that combines them.
//!
//! The finder and estimator are read-only queries usable on their own; the
//! [`BookingAllocator`] runs them inside its write transaction.

pub mod allocator;
pub mod availability;
pub mod estimator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use allocator::BookingAllocator;
pub use availability::find_available_rooms;
pub use estimator::{next_available, EstimatorScope, NextAvailability};
