pub mod io;
pub mod rgb;

pub use self::rgb::{RgbImage, RgbView, CHANNELS};
