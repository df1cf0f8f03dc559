use smallvec::SmallVec;

use crate::format::descriptor::PixelFormat;
use crate::format::sample::Sample;
use crate::foundation::error::{PigmentError, PigmentResult};

/// Inline capacity of a [`PixelValue`]: five channels of four bytes.
const INLINE_PIXEL_BYTES: usize = 20;

/// Read access to one pixel's channels, shared by owned values and live views.
pub trait PixelAccess {
    /// Format the bytes are laid out in.
    fn format(&self) -> PixelFormat;

    /// Raw channel bytes.
    fn bytes(&self) -> &[u8];

    /// Logical color channel `i`, normalized to `[0, 1]`.
    fn color_norm(&self, i: usize) -> f64 {
        let f = self.format();
        f.sample_type().read_norm(&self.bytes()[f.color_offset(i)..])
    }

    /// Alpha normalized to `[0, 1]`; formats without alpha read as opaque.
    fn alpha_norm(&self) -> f64 {
        let f = self.format();
        match f.alpha_offset() {
            Some(o) => f.sample_type().read_norm(&self.bytes()[o..]),
            None => 1.0,
        }
    }

    /// Logical color channel `i` as its storage type.
    fn color_sample<S: Sample>(&self, i: usize) -> S {
        let f = self.format();
        debug_assert_eq!(f.sample_type(), S::TYPE);
        S::read(&self.bytes()[f.color_offset(i)..])
    }

    /// Alpha as its storage type; formats without alpha read as `MAX`.
    fn alpha_sample<S: Sample>(&self) -> S {
        let f = self.format();
        debug_assert_eq!(f.sample_type(), S::TYPE);
        match f.alpha_offset() {
            Some(o) => S::read(&self.bytes()[o..]),
            None => S::from_scaled(S::MAX_SCALE),
        }
    }

    /// Detached copy of this pixel.
    fn to_value(&self) -> PixelValue {
        PixelValue {
            format: self.format(),
            bytes: SmallVec::from_slice(self.bytes()),
        }
    }
}

/// Write access to one pixel's channels.
pub trait PixelAccessMut: PixelAccess {
    /// Raw channel bytes.
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Set logical color channel `i` from a normalized value.
    fn set_color_norm(&mut self, i: usize, v: f64) {
        let f = self.format();
        f.sample_type()
            .write_norm(v, &mut self.bytes_mut()[f.color_offset(i)..]);
    }

    /// Set alpha from a normalized value. Ignored when the format has no alpha.
    fn set_alpha_norm(&mut self, v: f64) {
        let f = self.format();
        if let Some(o) = f.alpha_offset() {
            f.sample_type().write_norm(v, &mut self.bytes_mut()[o..]);
        }
    }

    /// Set logical color channel `i` from its storage type.
    fn set_color_sample<S: Sample>(&mut self, i: usize, v: S) {
        let f = self.format();
        debug_assert_eq!(f.sample_type(), S::TYPE);
        v.write(&mut self.bytes_mut()[f.color_offset(i)..]);
    }

    /// Set alpha from its storage type. Ignored when the format has no alpha.
    fn set_alpha_sample<S: Sample>(&mut self, v: S) {
        let f = self.format();
        debug_assert_eq!(f.sample_type(), S::TYPE);
        if let Some(o) = f.alpha_offset() {
            v.write(&mut self.bytes_mut()[o..]);
        }
    }

    /// Copy every channel from `other`, which must share this pixel's format.
    fn assign(&mut self, other: &impl PixelAccess) -> PigmentResult<()> {
        if self.format() != other.format() {
            return Err(PigmentError::format(format!(
                "cannot assign {} pixel to {} pixel",
                other.format(),
                self.format()
            )));
        }
        self.bytes_mut().copy_from_slice(other.bytes());
        Ok(())
    }
}

/// Owned copy of one pixel, independent of any block.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelValue {
    format: PixelFormat,
    bytes: SmallVec<[u8; INLINE_PIXEL_BYTES]>,
}

impl PixelValue {
    /// Zeroed pixel of the given format.
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format,
            bytes: SmallVec::from_elem(0, format.bytes_per_pixel()),
        }
    }

    /// Pixel from raw bytes, which must match the format's pixel size.
    pub fn from_bytes(format: PixelFormat, bytes: &[u8]) -> PigmentResult<Self> {
        if bytes.len() != format.bytes_per_pixel() {
            return Err(PigmentError::validation(format!(
                "{} pixel needs {} bytes, got {}",
                format,
                format.bytes_per_pixel(),
                bytes.len()
            )));
        }
        Ok(Self {
            format,
            bytes: SmallVec::from_slice(bytes),
        })
    }

    /// Pixel from normalized logical color channels and alpha.
    pub fn from_norm(format: PixelFormat, colors: &[f64], alpha: f64) -> PigmentResult<Self> {
        if colors.len() != format.color_channels() {
            return Err(PigmentError::validation(format!(
                "{} pixel needs {} color channels, got {}",
                format,
                format.color_channels(),
                colors.len()
            )));
        }
        let mut px = Self::new(format);
        for (i, &c) in colors.iter().enumerate() {
            px.set_color_norm(i, c);
        }
        px.set_alpha_norm(alpha);
        Ok(px)
    }

    /// 8-bit RGBA convenience constructor.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            format: PixelFormat::RGBA8,
            bytes: SmallVec::from_slice(&[r, g, b, a]),
        }
    }
}

impl PixelAccess for PixelValue {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl PixelAccessMut for PixelValue {
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Live mutable view of one pixel inside a block's buffer.
#[derive(Debug)]
pub struct PixelProxy<'a> {
    format: PixelFormat,
    bytes: &'a mut [u8],
}

impl<'a> PixelProxy<'a> {
    pub(crate) fn new(format: PixelFormat, bytes: &'a mut [u8]) -> Self {
        debug_assert_eq!(bytes.len(), format.bytes_per_pixel());
        Self { format, bytes }
    }
}

impl PixelAccess for PixelProxy<'_> {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn bytes(&self) -> &[u8] {
        &*self.bytes
    }
}

impl PixelAccessMut for PixelProxy<'_> {
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }
}

/// Live read-only view of one pixel inside a block's buffer.
#[derive(Clone, Copy, Debug)]
pub struct PixelRef<'a> {
    format: PixelFormat,
    bytes: &'a [u8],
}

impl<'a> PixelRef<'a> {
    pub(crate) fn new(format: PixelFormat, bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len(), format.bytes_per_pixel());
        Self { format, bytes }
    }
}

impl PixelAccess for PixelRef<'_> {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn bytes(&self) -> &[u8] {
        self.bytes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/pixel.rs"]
mod tests;
