//! Bounding-box sizing for staged previews.

/// Fit `(width, height)` inside a `max × max` box, preserving aspect ratio.
///
/// The longer side decides the scale (width wins ties only when strictly
/// longer). Images already inside the box are returned unchanged; nothing is
/// ever upscaled. Scaled sides round to the nearest pixel and never drop
/// below 1.
pub fn target_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let scale = if width > height {
        if width > max {
            f64::from(max) / f64::from(width)
        } else {
            return (width, height);
        }
    } else if height > max {
        f64::from(max) / f64::from(height)
    } else {
        return (width, height);
    };

    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}
