//! Image pipeline for the campaign website's admin panel
//!
//! Uploaded photos are validated, decoded and resized into three preset
//! renditions, then stored as data URIs on the content record of the
//! section they belong to.

pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod report;
pub mod store;

pub use error::{DecodeError, Error, Result, ValidationError};
