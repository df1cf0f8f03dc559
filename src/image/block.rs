use std::sync::Arc;

use crate::color::profile::ColorProfile;
use crate::format::descriptor::PixelFormat;
use crate::foundation::core::Rect;
use crate::foundation::error::{PigmentError, PigmentResult};
use crate::image::pixel::{PixelAccess, PixelAccessMut, PixelProxy, PixelRef, PixelValue};

/// Callback fired once per mutating operation with the affected rectangle.
///
/// The closure captures whatever identity or opaque host data it needs.
pub type InvalidateFn<'a> = Box<dyn Fn(&Rect) + Send + Sync + 'a>;

enum Storage<'a> {
    Owned(Vec<u8>),
    External(&'a mut [u8]),
}

impl Storage<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Owned(v) => v,
            Self::External(s) => s,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Owned(v) => v,
            Self::External(s) => s,
        }
    }
}

/// Image buffer with a fixed pixel format.
///
/// The buffer always holds exactly `stride * height` bytes, `stride = bytes_per_pixel * width`.
/// Storage is either owned or borrowed from the caller for `'a`.
pub struct Block<'a> {
    width: usize,
    height: usize,
    format: PixelFormat,
    storage: Storage<'a>,
    profile: Option<Arc<ColorProfile>>,
    on_invalidate: Option<InvalidateFn<'a>>,
}

impl std::fmt::Debug for Block<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format.name())
            .field("owned", &self.is_owned())
            .field("profile", &self.profile.as_ref().map(|p| p.name().to_owned()))
            .field("has_invalidate_cb", &self.on_invalidate.is_some())
            .finish()
    }
}

fn checked_len(width: usize, height: usize, format: PixelFormat) -> PigmentResult<usize> {
    if width == 0 || height == 0 {
        return Err(PigmentError::validation(format!(
            "block dimensions must be non-zero, got {width}x{height}"
        )));
    }
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(PigmentError::validation(format!(
            "block dimensions {width}x{height} exceed i32 range"
        )));
    }
    width
        .checked_mul(format.bytes_per_pixel())
        .and_then(|stride| stride.checked_mul(height))
        .ok_or_else(|| PigmentError::validation("block byte size overflows usize"))
}

impl<'a> Block<'a> {
    /// Zero-initialized owned block.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> PigmentResult<Self> {
        let len = checked_len(width, height, format)?;
        Ok(Self::from_parts(width, height, format, Storage::Owned(vec![0; len])))
    }

    /// Owned block initialized from a copy of `data`.
    pub fn from_data_copy(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: &[u8],
    ) -> PigmentResult<Self> {
        Self::from_vec(width, height, format, data.to_vec())
    }

    /// Owned block taking ownership of `data`.
    pub fn from_vec(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> PigmentResult<Self> {
        let len = checked_len(width, height, format)?;
        if data.len() != len {
            return Err(PigmentError::validation(format!(
                "{width}x{height} {format} block needs {len} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self::from_parts(width, height, format, Storage::Owned(data)))
    }

    /// Block viewing caller-owned memory. The buffer is never freed by the block.
    pub fn from_external(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: &'a mut [u8],
    ) -> PigmentResult<Self> {
        let len = checked_len(width, height, format)?;
        if data.len() != len {
            return Err(PigmentError::validation(format!(
                "{width}x{height} {format} block needs {len} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self::from_parts(width, height, format, Storage::External(data)))
    }

    fn from_parts(width: usize, height: usize, format: PixelFormat, storage: Storage<'a>) -> Self {
        Self {
            width,
            height,
            format,
            storage,
            profile: None,
            on_invalidate: None,
        }
    }

    /// Attach a color profile. The profile must describe the format's color model.
    pub fn with_profile(mut self, profile: Arc<ColorProfile>) -> PigmentResult<Self> {
        self.set_profile(Some(profile))?;
        Ok(self)
    }

    /// Replace the color profile. `None` falls back to the registry default for the model.
    pub fn set_profile(&mut self, profile: Option<Arc<ColorProfile>>) -> PigmentResult<()> {
        if let Some(p) = &profile
            && !p.supports(self.format.model())
        {
            return Err(PigmentError::validation(format!(
                "profile '{}' cannot describe {:?} pixels",
                p.name(),
                self.format.model()
            )));
        }
        self.profile = profile;
        Ok(())
    }

    /// Explicit profile, if one was attached.
    pub fn profile(&self) -> Option<&Arc<ColorProfile>> {
        self.profile.as_ref()
    }

    /// Register the invalidation callback.
    pub fn set_invalidate_callback(&mut self, cb: impl Fn(&Rect) + Send + Sync + 'a) {
        self.on_invalidate = Some(Box::new(cb));
    }

    /// Remove the invalidation callback.
    pub fn clear_invalidate_callback(&mut self) {
        self.on_invalidate = None;
    }

    /// Notify the host that `rect` changed.
    pub fn invalidate(&self, rect: Rect) {
        if let Some(cb) = &self.on_invalidate {
            cb(&rect);
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Bytes per scanline.
    pub fn stride(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    /// True when the buffer is owned (and freed) by the block.
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Full extent as a rectangle at the origin.
    pub fn rect(&self) -> Rect {
        // Dimensions are validated to fit in i32 at construction.
        Rect::from_size(self.width as i32, self.height as i32)
    }

    /// Raw bytes.
    pub fn data(&self) -> &[u8] {
        self.storage.as_slice()
    }

    /// Raw bytes, mutable.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.storage.as_mut_slice()
    }

    /// Scanline `y`.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height() {
            return None;
        }
        let stride = self.stride();
        self.data().get(y * stride..(y + 1) * stride)
    }

    /// Scanline `y`, mutable.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        if y >= self.height() {
            return None;
        }
        let stride = self.stride();
        self.data_mut().get_mut(y * stride..(y + 1) * stride)
    }

    /// All scanlines, top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        let stride = self.stride();
        self.data().chunks_exact(stride)
    }

    /// All scanlines, top to bottom, mutable.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let stride = self.stride();
        self.data_mut().chunks_exact_mut(stride)
    }

    fn pixel_range(&self, x: usize, y: usize) -> Option<std::ops::Range<usize>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let start = y * self.stride() + x * bpp;
        Some(start..start + bpp)
    }

    /// Read-only view of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<PixelRef<'_>> {
        let range = self.pixel_range(x, y)?;
        Some(PixelRef::new(self.format, &self.data()[range]))
    }

    /// Live mutable view of pixel `(x, y)`.
    pub fn pixel_proxy(&mut self, x: usize, y: usize) -> Option<PixelProxy<'_>> {
        let range = self.pixel_range(x, y)?;
        let format = self.format;
        Some(PixelProxy::new(format, &mut self.data_mut()[range]))
    }

    /// Detached copy of pixel `(x, y)`.
    pub fn pixel_value(&self, x: usize, y: usize) -> Option<PixelValue> {
        self.pixel(x, y).map(|p| p.to_value())
    }

    /// Overwrite pixel `(x, y)` with `value`, which must share the block's format.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: &impl PixelAccess) -> PigmentResult<()> {
        let (w, h) = (self.width, self.height);
        let mut proxy = self.pixel_proxy(x, y).ok_or_else(|| {
            PigmentError::validation(format!("pixel ({x}, {y}) outside {w}x{h} block"))
        })?;
        proxy.assign(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/block.rs"]
mod tests;
