use rgb_denoiser::image::{RgbImage, CHANNELS};

/// Uniform image with every sample set to `value`.
pub fn uniform_rgb(width: usize, height: usize, value: u8) -> RgbImage {
    RgbImage::filled(width, height, value)
}

/// Deterministic textured image: smooth gradients plus a strong diagonal
/// edge, so every channel varies and interior pixels actually move.
pub fn textured_rgb(width: usize, height: usize) -> RgbImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut data = vec![0u8; width * height * CHANNELS];
    for y in 0..height {
        for x in 0..width {
            let base = (y * width + x) * CHANNELS;
            let edge: u8 = if x + y < (width + height) / 2 { 0 } else { 160 };
            data[base] = ((x * 17 + y * 5) % 96) as u8 + edge;
            data[base + 1] = ((x * 7 + y * 23) % 96) as u8 + edge;
            data[base + 2] = ((x * 3 + y * 41) % 96) as u8;
        }
    }
    RgbImage::from_raw(width, height, data).expect("buffer sized from dimensions")
}
