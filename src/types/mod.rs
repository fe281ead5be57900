//! Common types used throughout the Cloudinary integration.
//!
//! This module defines upload inputs, policies, and results.

mod common;
mod requests;
mod responses;

pub use common::*;
pub use requests::*;
pub use responses::*;
