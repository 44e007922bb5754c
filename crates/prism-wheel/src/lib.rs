//! HSV color wheel.
//!
//! A hue ring around a saturation/value triangle, on a 250×250 canvas. The
//! triangle rotates with the hue: vertex B always points at the selected hue,
//! A is white and C is black.
//!
//! ```rust
//! use prism_core::*;
//! use prism_wheel::*;
//!
//! let mut wheel = ColorWheel::new();
//! wheel.load();
//! assert_eq!(wheel.selected_color(), Color(255, 0, 0, 255));
//!
//! // Drag on the ring, straight down from the center: hue 90.
//! wheel.handle_pointer(&PointerEvent::down(Vec2::new(125.0, 240.0)));
//! wheel.handle_pointer(&PointerEvent::up(Vec2::new(125.0, 240.0)));
//! assert!((wheel.hue() - 90.0).abs() < 1e-9);
//! ```

mod raster;
mod wheel;


pub use raster::*;
pub use wheel::*;
