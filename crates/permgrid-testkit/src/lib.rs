//! # Permgrid Testkit
//!
//! Testing utilities for the permgrid workspace.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Generators**: Proptest strategies for permission masks, permission
//!   text (including noise characters), identifiers, and records
//! - **Fixtures**: Pre-populated matrix stores for scenario tests
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use permgrid_testkit::generators::permission_text;
//!
//! proptest! {
//!     #[test]
//!     fn decode_never_panics(text in permission_text()) {
//!         let _ = permgrid_core::PermissionSet::decode(&text);
//!     }
//! }
//! ```
//!
//! ## Fixtures
//!
//! Quickly set up a populated matrix:
//!
//! ```rust
//! use permgrid_testkit::fixtures::MatrixFixture;
//!
//! let fixture = MatrixFixture::sample();
//! assert_eq!(fixture.store.user_count(), 2);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{sample_records, MatrixFixture};
pub use generators::{
    access_record, file_name, non_empty_permission_set, permission_set, permission_text,
    update_record, user_id,
};
