//! Defines the data structures and models used throughout the application.
//!
//! `accuweather` holds the provider payload shapes as they come off the wire;
//! `dashboard` holds the readings and severity bands the presenter works with.

mod accuweather;
mod dashboard;

pub use accuweather::*;
pub use dashboard::*;
