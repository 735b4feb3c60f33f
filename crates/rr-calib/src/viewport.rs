//! Mapping between an on-screen view and image pixels.
//!
//! Map images are shown aspect-fit and centred: scaled by
//! `min(view.w / image.w, view.h / image.h)` with the leftover space split
//! evenly on both sides.

use crate::PixelPoint;

/// Width and height in pixels (or view points).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width:  f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Scale and offsets of the fitted image inside the view.
fn fit(view: Size, image: Size) -> Option<(f64, f64, f64)> {
    if !view.is_drawable() || !image.is_drawable() {
        return None;
    }
    let scale = (view.width / image.width).min(view.height / image.height);
    let x_off = (view.width - image.width * scale) / 2.0;
    let y_off = (view.height - image.height * scale) / 2.0;
    Some((scale, x_off, y_off))
}

/// Convert a tap at `point` in the view into image pixels.
///
/// `None` if the tap lands in the letterbox outside the image, or either
/// size is empty.
pub fn view_to_image(point: PixelPoint, view: Size, image: Size) -> Option<PixelPoint> {
    let (scale, x_off, y_off) = fit(view, image)?;
    let x = (point.x - x_off) / scale;
    let y = (point.y - y_off) / scale;
    let inside = (0.0..=image.width).contains(&x) && (0.0..=image.height).contains(&y);
    inside.then_some(PixelPoint::new(x, y))
}

/// Where image pixel `point` is drawn in the view.
pub fn image_to_view(point: PixelPoint, view: Size, image: Size) -> Option<PixelPoint> {
    let (scale, x_off, y_off) = fit(view, image)?;
    Some(PixelPoint::new(point.x * scale + x_off, point.y * scale + y_off))
}
