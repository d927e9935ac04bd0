//! 3x3 per-channel median filter.
//!
//! Independent per pixel, so the parallel variant simply fans rows out across
//! rayon; both variants produce identical bytes. The outermost row and column
//! pass through unchanged, matching the diffusion filter's border policy.
use rayon::prelude::*;

use crate::image::{RgbImage, RgbView, CHANNELS};

/// Median-filter `input` sequentially.
pub fn median_filter_rgb(input: &RgbImage) -> RgbImage {
    let view = input.as_view();
    let row_samples = input.row_samples();
    let mut out = input.as_bytes().to_vec();
    for (y, row) in out
        .chunks_mut(row_samples)
        .enumerate()
        .take(input.height().saturating_sub(1))
        .skip(1)
    {
        median_row(&view, y, row);
    }
    RgbImage::from_raw(input.width(), input.height(), out)
        .expect("median output preserves dimensions")
}

/// Median-filter `input` with rows fanned out across the rayon pool.
pub fn median_filter_rgb_parallel(input: &RgbImage) -> RgbImage {
    let view = input.as_view();
    let row_samples = input.row_samples();
    let height = input.height();
    let mut out = input.as_bytes().to_vec();
    out.par_chunks_mut(row_samples)
        .enumerate()
        .for_each(|(y, row)| {
            if y >= 1 && y + 1 < height {
                median_row(&view, y, row);
            }
        });
    RgbImage::from_raw(input.width(), input.height(), out)
        .expect("median output preserves dimensions")
}

fn median_row(view: &RgbView, y: usize, out: &mut [u8]) {
    for x in 1..view.w.saturating_sub(1) {
        for c in 0..CHANNELS {
            let mut window = [0u8; 9];
            let mut i = 0;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let sy = (y as i32 + dy) as usize;
                    let sx = (x as i32 + dx) as usize;
                    window[i] = view.get(sx, sy, c);
                    i += 1;
                }
            }
            window.sort_unstable();
            out[x * CHANNELS + c] = window[4];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_an_isolated_salt_pixel() {
        let mut img = RgbImage::filled(5, 5, 128);
        for c in 0..3 {
            img.set_sample(2, 2, c, 255);
        }
        let out = median_filter_rgb(&img);
        assert_eq!(out.sample(2, 2, 0), 128);
    }

    #[test]
    fn preserves_borders() {
        let mut img = RgbImage::filled(5, 4, 60);
        img.set_sample(0, 0, 0, 7);
        img.set_sample(4, 3, 2, 8);
        img.set_sample(2, 0, 1, 9);
        let out = median_filter_rgb(&img);
        assert_eq!(out.sample(0, 0, 0), 7);
        assert_eq!(out.sample(4, 3, 2), 8);
        assert_eq!(out.sample(2, 0, 1), 9);
    }

    #[test]
    fn preserves_a_straight_edge() {
        let mut img = RgbImage::filled(6, 6, 0);
        for y in 0..6 {
            for x in 3..6 {
                for c in 0..3 {
                    img.set_sample(x, y, c, 200);
                }
            }
        }
        let out = median_filter_rgb(&img);
        assert_eq!(out.sample(2, 3, 0), 0);
        assert_eq!(out.sample(3, 3, 0), 200);
    }

    #[test]
    fn serial_and_parallel_agree() {
        let mut img = RgbImage::filled(9, 7, 100);
        for (i, b) in img.as_bytes_mut().iter_mut().enumerate() {
            *b = (i * 31 % 251) as u8;
        }
        assert_eq!(median_filter_rgb(&img), median_filter_rgb_parallel(&img));
    }
}
