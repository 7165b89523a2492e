//! Input validation helpers shared by front ends.

pub mod validation;

pub use validation::{UrlValidationError, validate_experience_url};
