/// Samples per pixel: R, G, B interleaved.
pub const CHANNELS: usize = 3;

/// Owned 8-bit RGB buffer, row-major, channel-interleaved, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImage {
    /// Construct from raw interleaved bytes; the length must match the
    /// dimensions exactly.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, String> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(format!(
                "Buffer size mismatch for {width}x{height} RGB image: expected {expected} bytes, got {}",
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// All samples set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height * CHANNELS],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per row (`width * 3`).
    #[inline]
    pub fn row_samples(&self) -> usize {
        self.width * CHANNELS
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y * self.width + x) * CHANNELS + c]
    }

    #[inline]
    pub fn set_sample(&mut self, x: usize, y: usize, c: usize, value: u8) {
        self.data[(y * self.width + x) * CHANNELS + c] = value;
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as a read-only `RgbView`.
    pub fn as_view(&self) -> RgbView<'_> {
        RgbView {
            w: self.width,
            h: self.height,
            stride: self.width * CHANNELS,
            data: &self.data,
        }
    }
}

/// Borrowed read-only RGB view. `stride` is the sample distance between rows,
/// which allows viewing a full-image byte slice owned elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct RgbView<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> RgbView<'a> {
    /// View over a tightly packed full-image byte slice.
    pub fn from_bytes(width: usize, height: usize, data: &'a [u8]) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            w: width,
            h: height,
            stride: width * CHANNELS,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[y * self.stride + x * CHANNELS + c]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * CHANNELS]
    }
}
