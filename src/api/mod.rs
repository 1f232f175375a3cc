/// Generation backend access
///
/// - `wire.rs` - request/response JSON types
/// - `client.rs` - the one-shot HTTP client and the backend trait

pub mod client;
pub mod wire;

pub use client::{GenerationBackend, GenerationClient};
