pub mod field;
pub mod resource;

pub use field::Field;
pub use resource::{label, parse_label, Resource, ResourceIndex};
