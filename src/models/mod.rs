//! Data models for contacts.
//!
//! This module contains the validated contact record and the raw, unvalidated
//! field mapping that the contact validator consumes.

pub mod contact;

pub use contact::{ContactField, ContactRecord, RawContact};
