//! # Permgrid Core
//!
//! Pure value types for the permgrid access-control matrix.
//!
//! This crate contains no I/O and no mutable state. It is pure computation
//! over small value types.
//!
//! ## Key Types
//!
//! - [`PermissionSet`] - A 3-bit owner/read/write mask with a text codec
//! - [`UserId`] / [`FileName`] - Identifier newtypes
//! - [`AccessRecord`] / [`UpdateRecord`] / [`AccessRequest`] - Parsed
//!   record tuples consumed by the matrix engine
//!
//! ## Permission Codec
//!
//! Permission text uses the three-letter alphabet `o` (owner), `r` (read),
//! `w` (write). Decoding skips unrecognized characters; encoding always
//! renders the canonical `orw` order. See [`PermissionSet`].

pub mod permission;
pub mod record;
pub mod types;

pub use permission::PermissionSet;
pub use record::{AccessRecord, AccessRequest, UpdateAction, UpdateRecord};
pub use types::{FileName, UserId};
