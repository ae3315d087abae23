/// Dimensions that fit `source` inside a `max_edge` square.
///
/// Aspect ratio is preserved, images are never upscaled, and neither side
/// drops below one pixel.
///
/// ```
/// # use headshot_studio::imaging::fit_within;
/// assert_eq!(fit_within((3000, 2000), 1024), (1024, 683));
/// assert_eq!(fit_within((800, 600), 1024), (800, 600));
/// ```
pub fn fit_within(source: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (width, height) = source;
    let longer_edge = width.max(height);

    if longer_edge <= max_edge || width == 0 || height == 0 {
        return source;
    }

    let ratio = max_edge as f64 / longer_edge as f64;
    if width >= height {
        let h = (height as f64 * ratio).round().max(1.0) as u32;
        (max_edge, h)
    } else {
        let w = (width as f64 * ratio).round().max(1.0) as u32;
        (w, max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_is_bounded_on_width() {
        assert_eq!(fit_within((3000, 2000), 1024), (1024, 683));
    }

    #[test]
    fn portrait_is_bounded_on_height() {
        assert_eq!(fit_within((2000, 4000), 1024), (512, 1024));
    }

    #[test]
    fn square_hits_both_bounds() {
        assert_eq!(fit_within((2048, 2048), 1024), (1024, 1024));
    }

    #[test]
    fn small_images_are_never_upscaled() {
        assert_eq!(fit_within((640, 480), 1024), (640, 480));
        assert_eq!(fit_within((1024, 700), 1024), (1024, 700));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within((10_000, 1), 1024), (1024, 1));
    }
}
