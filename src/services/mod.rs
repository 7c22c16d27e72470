//! External-service adapters.
//!
//! # Services
//!
//! - [`upload`] - multipart document upload to the media service, with
//!   progress events, a hard timeout, and response parsing
//!
//! Persistence of the resulting asset locations is owned by the caller
//! through the uploader's on-uploaded callback; no service here touches
//! the supplier record.

pub mod upload;

pub use upload::*;
