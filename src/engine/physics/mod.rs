// Physics primitives: vertical motion integration and box overlap tests

pub mod body;
mod collision;

pub use body::VerticalBody;
pub use collision::Aabb;
