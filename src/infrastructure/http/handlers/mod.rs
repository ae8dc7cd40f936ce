//! HTTP Handlers

mod ping;
mod speech;

pub use ping::*;
pub use speech::*;
