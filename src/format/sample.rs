use std::fmt::Debug;

/// Storage type of one channel sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    /// 8-bit unsigned integer, range `[0, 255]`.
    U8,
    /// 16-bit unsigned integer, range `[0, 65535]`.
    U16,
    /// 32-bit unsigned integer, range `[0, u32::MAX]`.
    U32,
    /// 32-bit float, normalized to `[0, 1]`.
    F32,
}

impl SampleType {
    /// Bytes used by one sample.
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
        }
    }

    /// True for floating-point (normalized) samples.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32)
    }

    /// Largest representable channel value, on the sample's own scale.
    pub const fn max_value(self) -> f64 {
        match self {
            Self::U8 => u8::MAX_SCALE,
            Self::U16 => u16::MAX_SCALE,
            Self::U32 => u32::MAX_SCALE,
            Self::F32 => f32::MAX_SCALE,
        }
    }

    /// Read the sample at the start of `bytes` and normalize it to `[0, 1]`.
    pub fn read_norm(self, bytes: &[u8]) -> f64 {
        match self {
            Self::U8 => u8::read(bytes).to_norm(),
            Self::U16 => u16::read(bytes).to_norm(),
            Self::U32 => u32::read(bytes).to_norm(),
            Self::F32 => f32::read(bytes).to_norm(),
        }
    }

    /// Write a normalized value into the start of `bytes`, rounding integer samples.
    pub fn write_norm(self, value: f64, bytes: &mut [u8]) {
        match self {
            Self::U8 => u8::from_norm(value).write(bytes),
            Self::U16 => u16::from_norm(value).write(bytes),
            Self::U32 => u32::from_norm(value).write(bytes),
            Self::F32 => f32::from_norm(value).write(bytes),
        }
    }

    /// Lowercase name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F32 => "f32",
        }
    }
}

/// A channel sample type the blend and conversion kernels are monomorphized over.
///
/// Arithmetic is carried out in `f64` on the sample's own scale (`0..=MAX_SCALE`), which is wider
/// than every storage type, and rounded once when written back.
pub trait Sample: Copy + Send + Sync + PartialEq + PartialOrd + Debug + 'static {
    /// Runtime tag for this type.
    const TYPE: SampleType;
    /// Bytes per sample.
    const BYTES: usize;
    /// Maximum channel value as `f64`.
    const MAX_SCALE: f64;

    /// Decode from the first `BYTES` bytes (native endian).
    fn read(bytes: &[u8]) -> Self;

    /// Encode into the first `BYTES` bytes (native endian).
    fn write(self, bytes: &mut [u8]);

    /// Value on the sample's own scale.
    fn to_scaled(self) -> f64;

    /// Round and clamp a value on the sample's own scale.
    fn from_scaled(v: f64) -> Self;

    /// Value mapped to `[0, 1]`.
    fn to_norm(self) -> f64 {
        self.to_scaled() / Self::MAX_SCALE
    }

    /// Inverse of [`Sample::to_norm`].
    fn from_norm(v: f64) -> Self {
        Self::from_scaled(v * Self::MAX_SCALE)
    }
}

macro_rules! impl_int_sample {
    ($t:ty, $tag:ident) => {
        impl Sample for $t {
            const TYPE: SampleType = SampleType::$tag;
            const BYTES: usize = std::mem::size_of::<$t>();
            const MAX_SCALE: f64 = <$t>::MAX as f64;

            #[inline]
            fn read(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(&bytes[..Self::BYTES]);
                <$t>::from_ne_bytes(raw)
            }

            #[inline]
            fn write(self, bytes: &mut [u8]) {
                bytes[..Self::BYTES].copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn to_scaled(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_scaled(v: f64) -> Self {
                // `as` saturates and maps NaN to zero.
                v.round().clamp(0.0, Self::MAX_SCALE) as $t
            }
        }
    };
}

impl_int_sample!(u8, U8);
impl_int_sample!(u16, U16);
impl_int_sample!(u32, U32);

impl Sample for f32 {
    const TYPE: SampleType = SampleType::F32;
    const BYTES: usize = 4;
    const MAX_SCALE: f64 = 1.0;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[..4]);
        f32::from_ne_bytes(raw)
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn to_scaled(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_scaled(v: f64) -> Self {
        v.clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/sample.rs"]
mod tests;
