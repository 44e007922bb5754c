//! # Colors, Geometry, Signals, and the Dispatcher
//!
//! Shared building blocks for the Prism widgets. Nothing here knows about a
//! particular windowing system; hosts feed pointer events in and read rasters
//! and state back out.
//!
//! - `Color` / `Hsv`: byte RGBA color and the HSV conversions the wheel uses.
//! - `Vec2`, `Rect`, `Triangle`: f64 geometry with barycentric helpers.
//! - `Signal<T>`: observable value with synchronous subscribers.
//! - `Dispatcher<T>`: queue of jobs applied on the owning thread.
//!
//! ## Colors
//!
//! ```rust
//! use prism_core::*;
//!
//! let red = Color::from_hsv(0.0, 1.0, 1.0);
//! assert_eq!(red, Color(255, 0, 0, 255));
//! assert_eq!(red.to_argb_hex(), "#FFFF0000");
//! assert_eq!(red.to_hsv().h, 0.0);
//! ```
//!
//! ## Signals
//!
//! `Signal<T>` replaces a toolkit's bindable property. Writes run every
//! subscriber synchronously:
//!
//! ```rust
//! use prism_core::*;
//! use std::{cell::Cell, rc::Rc};
//!
//! let color = signal(Color::WHITE);
//! let seen = Rc::new(Cell::new(0));
//! color.subscribe({
//!     let seen = seen.clone();
//!     move |_| seen.set(seen.get() + 1)
//! });
//! color.set(Color::BLACK);
//! assert_eq!(seen.get(), 1);
//! ```
//!
//! ## Dispatcher
//!
//! The owning thread is the only writer of visible state. Workers post
//! closures through a `DispatcherHandle`, and the owner applies them when it
//! pumps:
//!
//! ```rust
//! use prism_core::Dispatcher;
//!
//! let dispatcher = Dispatcher::<Vec<u32>>::new();
//! let handle = dispatcher.handle();
//! std::thread::spawn(move || handle.post(|v| v.push(7))).join().unwrap();
//!
//! let mut state = Vec::new();
//! assert_eq!(dispatcher.pump(&mut state), 1);
//! assert_eq!(state, vec![7]);
//! ```

pub mod color;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod input;
pub mod signal;
pub mod tests;

pub use color::*;
pub use dispatch::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use signal::*;
