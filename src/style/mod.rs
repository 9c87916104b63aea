pub mod color;
pub mod expression;
pub mod transition;

pub use color::Color;
pub use expression::Expression;
pub use transition::{GeoJsonSource, IconImage, TransitionStyle};
