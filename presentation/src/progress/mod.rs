//! Progress reporting while leads are delivered

pub mod reporter;
