//! Salt-and-pepper noise injection, used to build denoising test inputs.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::image::{RgbImage, CHANNELS};

/// Flip each pixel to white or black with probability `probability / 2` each.
/// Seeded, so a given `(image, probability, seed)` triple always produces the
/// same noise pattern.
pub fn salt_and_pepper(image: &mut RgbImage, probability: f32, seed: u64) {
    let probability = probability.clamp(0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    for pixel in image.as_bytes_mut().chunks_mut(CHANNELS) {
        let roll: f32 = rng.gen();
        if roll < probability / 2.0 {
            pixel.fill(255);
        } else if roll < probability {
            pixel.fill(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_noise() {
        let mut a = RgbImage::filled(16, 16, 128);
        let mut b = RgbImage::filled(16, 16, 128);
        salt_and_pepper(&mut a, 0.2, 7);
        salt_and_pepper(&mut b, 0.2, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn noisy_pixels_are_pure_black_or_white() {
        let mut img = RgbImage::filled(32, 32, 128);
        salt_and_pepper(&mut img, 0.3, 1);
        let mut flipped = 0usize;
        for pixel in img.as_bytes().chunks(CHANNELS) {
            match pixel {
                [128, 128, 128] => {}
                [0, 0, 0] | [255, 255, 255] => flipped += 1,
                other => panic!("unexpected pixel {other:?}"),
            }
        }
        // with p = 0.3 over 1024 pixels, a silent no-op would be a bug
        assert!(flipped > 100, "only {flipped} pixels flipped");
    }

    #[test]
    fn zero_probability_is_identity() {
        let mut img = RgbImage::filled(8, 8, 42);
        let original = img.clone();
        salt_and_pepper(&mut img, 0.0, 3);
        assert_eq!(img, original);
    }
}
