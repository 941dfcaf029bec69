//! # logic_sim
//!
//! Two complementary ways to drive a [`logic_core::Netlist`] to a steady
//! state:
//!
//! - [`zero_delay`]: a single topological-order pass under the binary
//!   evaluation rules (§4.3), ignoring gate delay. Used by SCOAP and by
//!   PODEM's implication step, where only the settled logic values matter.
//! - [`event_sim`]: a delay-aware, event-driven simulator (§4.4) that
//!   schedules each gate's output change at `fire_time = now + delay` on
//!   a global priority queue, producing a dense time-indexed trace.

pub mod error;
pub mod event_sim;
pub mod zero_delay;

pub use error::{Result, SimError};
pub use event_sim::{Stimulus, Trace};
