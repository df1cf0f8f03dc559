//! Pigment is a multi-format pixel compositing engine.
//!
//! It blends, fills, clears, copies and converts image blocks whose pixels may use any
//! supported color model (Grey, RGB, HSL, HSV, CMYK, Lab, XYZ), channel order, alpha placement
//! and sample type (`u8`, `u16`, `u32`, `f32`).
//!
//! # Overview
//!
//! - [`Block`] owns or borrows a pixel buffer with a fixed [`PixelFormat`].
//! - [`blend`] / [`blend_rect`] combine a source block into a backdrop with one of the
//!   [`BlendMode`]s and [`AlphaMode`]s, at an opacity, scanline by scanline.
//! - [`fill`], [`clear`] and their rectangle variants write solid pixels.
//! - [`convert_type_and_layout_into`] and [`convert_into`] move pixels between formats; the
//!   latter goes through a colorimetric connection space when profiles differ.
//! - Every operation runs against a [`Context`] holding the [`WorkerPool`] and the
//!   [`ProfileRegistry`], and takes [`PerformanceOptions`] hints.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: serial and parallel execution produce identical bytes, and so do the
//!   generic and the RGBA8 fast path.
//! - **Typed errors**: precondition violations return [`PigmentError`]; empty geometry is a
//!   silent no-op.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation {
    pub mod core;
    pub mod error;
    pub mod options;
}

mod format {
    pub mod descriptor;
    pub mod sample;
}

mod image {
    pub mod block;
    pub mod pixel;
}

mod color {
    pub mod bridge;
    pub mod profile;
    pub mod space;
    pub mod value;
}

mod pool {
    pub mod worker;
}

mod blend {
    pub mod alpha;
    pub mod block;
    pub mod compositor;
    pub mod func;
    pub mod modes;
    pub mod pixel;
    pub mod rgba8;
}

mod ops {
    pub mod clear_fill;
    pub mod convert;
    pub mod copy;
}

mod context;

pub use blend::alpha::blend_alpha;
pub use blend::block::{BlendParams, blend, blend_rect};
pub use blend::compositor::{AlphaTerms, composite};
pub use blend::modes::{AlphaMode, BlendMode};
pub use blend::pixel::dissolve_toss;
pub use color::bridge::{Diagnosis, PixelConverter};
pub use color::profile::{
    ColorProfile, ColorTransform, ConnectionValues, ProfileRegistry, ProfileTransform, TransferFn,
};
pub use color::value::Color;
pub use context::Context;
pub use format::descriptor::{AlphaPlacement, ColorModel, PixelFormat};
pub use format::sample::{Sample, SampleType};
pub use foundation::core::{Point, Rect};
pub use foundation::error::{PigmentError, PigmentResult};
pub use foundation::options::PerformanceOptions;
pub use image::block::{Block, InvalidateFn};
pub use image::pixel::{PixelAccess, PixelAccessMut, PixelProxy, PixelRef, PixelValue};
pub use ops::clear_fill::{clear, clear_rect, fill, fill_preserve_alpha, fill_rect};
pub use ops::convert::{convert_into, convert_type_and_layout_into};
pub use ops::copy::{copy_block_into, copy_block_rect_into, trimmed_transparency_rect};
pub use pool::worker::WorkerPool;
