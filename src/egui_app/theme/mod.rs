//! Theme Module
//!
//! Light and dark palettes for the notes app and helpers that apply them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notekeeper::egui_app::theme::styles;
//!
//! styles::apply_theme(ctx, state.theme);
//! let palette = colors::palette(state.theme);
//! styles::card_frame(palette).show(ui, |ui| { /* note body */ });
//! ```

pub mod colors;
pub mod styles;

pub use colors::{palette, Palette};
pub use styles::*;
