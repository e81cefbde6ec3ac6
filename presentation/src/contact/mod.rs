//! Interactive contact form

pub mod prompt;
