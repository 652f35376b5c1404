use image::{Rgb, RgbImage};

/// Channel level above which a pixel counts as bright
pub const BRIGHT_THRESHOLD: u8 = 200;
/// Channel level below which a pixel counts as dark
pub const DARK_THRESHOLD: u8 = 60;

/// Resize an image to the specified dimensions
///
/// Images already at the target size are returned as a copy without resampling.
pub fn resize_image(
    image: &RgbImage,
    dimensions: [u32; 2],
) -> RgbImage {
    let (width, height) = (dimensions[0], dimensions[1]);
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    image::imageops::resize(
        image,
        width,
        height,
        image::imageops::FilterType::Triangle,
    )
}

#[inline]
fn channels(pixel: &Rgb<u8>) -> (f64, f64, f64) {
    (pixel[0] as f64, pixel[1] as f64, pixel[2] as f64)
}

/// All channels above 200
#[inline]
pub fn is_bright(pixel: &Rgb<u8>) -> bool {
    pixel.0.iter().all(|&c| c > BRIGHT_THRESHOLD)
}

/// All channels below 60
#[inline]
pub fn is_dark(pixel: &Rgb<u8>) -> bool {
    pixel.0.iter().all(|&c| c < DARK_THRESHOLD)
}

/// Saturated red: ripe fruit, rust pustules
#[inline]
pub fn is_red(pixel: &Rgb<u8>) -> bool {
    let (r, g, b) = channels(pixel);
    r > 140.0 && r > g * 1.3 && r > b * 1.3
}

#[inline]
pub fn is_orange(pixel: &Rgb<u8>) -> bool {
    let (r, g, b) = channels(pixel);
    r > 150.0 && g > 80.0 && g < 150.0 && b < 100.0
}

/// Yellow or pale tissue
#[inline]
pub fn is_yellow(pixel: &Rgb<u8>) -> bool {
    let (r, g, b) = channels(pixel);
    r > 150.0 && g > 130.0 && b < 120.0
}

/// Green-dominant vegetation
#[inline]
pub fn is_green(pixel: &Rgb<u8>) -> bool {
    let (r, g, b) = channels(pixel);
    g > r && g > b && g > 60.0
}

/// Brown or tan dead tissue
#[inline]
pub fn is_brown(pixel: &Rgb<u8>) -> bool {
    let (r, g, b) = channels(pixel);
    r > 80.0 && r < 160.0 && g > 60.0 && g < 140.0 && b < 100.0
}
