pub mod interpolation;

pub use interpolation::{interpolate, ControlPoint, Interpolation, ZoomCurve};
