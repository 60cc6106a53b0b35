pub mod config;
pub mod decode;
pub mod error;
pub mod input;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod surface;
