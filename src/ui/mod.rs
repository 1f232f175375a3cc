/// User interface building blocks
///
/// - `panels.rs` - view builders for each screen region
/// - `previews.rs` - cached texture handles for displayed payloads

pub mod panels;
pub mod previews;

pub use previews::Previews;
