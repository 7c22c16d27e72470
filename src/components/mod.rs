//! UI Components for the supplier portal.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Portal navigation bar
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploaderSection`] - Document upload lanes with progress
//! - [`SubmittedDocuments`] - Stored locations collected so far
//! - [`NoticeStack`] - Transient notifications

mod documents;
mod footer;
mod header;
mod hero;
mod notices;
mod uploader;

pub use documents::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use notices::*;
pub use uploader::*;
