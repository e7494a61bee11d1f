//! Shared site model used by both the web service and the browser runtime.
//!
//! This crate owns the contact-form contract (input shape, validation rules,
//! and the JSON envelope returned by `POST /api/contact`) plus the small
//! lookup tables that map closed enumerations to icons, labels, and routes.
//! It has no I/O of its own.

pub mod contact;
pub mod content;
