pub mod build;
pub mod config;
pub mod contrast;
pub mod harmonies;
pub mod palette;
pub mod type_scale;
