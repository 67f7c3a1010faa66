//! Spin simulation module
//!
//! The algorithmic core of the wheel. This module must stay pure and
//! driver-agnostic:
//! - One logical tick per external `update()` call, no owned scheduler
//! - All randomness through the injected source
//! - No rendering or platform dependencies

pub mod engine;
pub mod segment;

pub use engine::{SpinCallback, SpinEngine};
pub use segment::{Segment, SegmentHit, SegmentMap};
