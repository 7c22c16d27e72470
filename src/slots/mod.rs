//! Upload slot state machine.
//!
//! An upload *slot* is one independent lane: it holds at most one staged
//! file, uploads it at most once at a time, and remembers the stored
//! location afterwards. The [`SlotManager`] owns the ordered lane
//! collection and mediates between the file picker, the upload transport,
//! and the on-uploaded callback.
//!
//! # Modules
//!
//! - [`slot`] - `Slot`, `SlotPhase`, `SlotId`, and the `FileLike` seam
//! - [`manager`] - `SlotManager` operations and the `UploadTicket`
//!
//! Everything in here is plain data and synchronous transitions; the
//! browser-facing pieces (file input, XHR transport, timers) live in
//! `components` and `services` and drive this machine through discrete
//! calls. That keeps the lane logic natively testable.

mod manager;
mod slot;

pub use manager::*;
pub use slot::*;
