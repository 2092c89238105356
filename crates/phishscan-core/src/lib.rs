pub mod config;
pub mod logging;

pub mod classifier;
pub mod error;
pub mod features;
pub mod lookup;
pub mod scan;
pub mod url_model;
