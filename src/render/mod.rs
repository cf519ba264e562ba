//! Text renderers for decoded profiles
//!
//! - [`xml`]: nested element form with two-space indentation
//! - [`json`]: the simplified schema the generator accepts as input

pub mod json;
pub mod xml;

pub use json::{simplify, to_json, SimplifiedAction, SimplifiedCommand, SimplifiedProfile};
pub use xml::to_xml;
