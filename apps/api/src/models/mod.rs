pub mod annotation;
pub mod resume;
