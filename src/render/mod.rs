//! Rendering module for layout plans.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{slide_instructions, to_instructions};
