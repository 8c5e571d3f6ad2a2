//! HTTP Handlers

mod health;
mod synthesize;
mod voice;

pub use health::*;
pub use synthesize::*;
pub use voice::*;
