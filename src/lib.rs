// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing))]

//! Menu selector widget: a control that cycles through a fixed list of
//! labeled options with keyboard, joystick, mouse or touch input.

pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod graphics;
pub mod menu;
pub mod sound;
pub mod widget;

pub use controls::Controls;
pub use error::SelectorError;
pub use events::{InputEvent, MouseButton};
pub use graphics::{Color, Rect, Surface, TextRenderer};
pub use menu::{Menu, MenuContext};
pub use sound::{NoSound, SoundPlayer};
pub use widget::selector::{
    Element, FancyStyle, SelectionEvent, Selector, SelectorBuilder, SelectorItem, SelectorStyle,
};
pub use widget::{RenderOutcome, Widget, WidgetBase};
