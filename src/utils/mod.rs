pub mod text;

pub use text::{truncate_with_ellipsis, wrap_text};
