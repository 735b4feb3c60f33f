//! Affine geo → pixel transform.

use rr_core::GeoPoint;

/// A point in image pixel space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const ZERO: PixelPoint = PixelPoint { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_2(self, other: PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Six affine coefficients:
///
/// ```text
/// x = a·lat + b·lng + tx
/// y = c·lat + d·lng + ty
/// ```
///
/// Persisted as the array `[a, b, c, d, tx, ty]`.  A new calibration
/// replaces the whole transform.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 6]", into = "[f64; 6]"))]
pub struct Transform {
    pub a:  f64,
    pub b:  f64,
    pub c:  f64,
    pub d:  f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    /// Per-axis fallback used when an axis cannot be solved: coefficient 1
    /// on latitude, nothing else.
    pub const FALLBACK: Transform = Transform { a: 1.0, b: 0.0, c: 1.0, d: 0.0, tx: 0.0, ty: 0.0 };

    /// Read `[a, b, c, d, tx, ty]`.  `None` unless exactly six values.
    pub fn from_coefficients(coefficients: &[f64]) -> Option<Self> {
        let &[a, b, c, d, tx, ty] = coefficients else {
            return None;
        };
        Some(Self { a, b, c, d, tx, ty })
    }

    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }

    #[inline]
    pub fn project(&self, pos: GeoPoint) -> PixelPoint {
        PixelPoint {
            x: self.a * pos.lat + self.b * pos.lng + self.tx,
            y: self.c * pos.lat + self.d * pos.lng + self.ty,
        }
    }

    /// Map a pixel back to lat/lng.  `None` if the linear part is singular
    /// (e.g. after a degenerate fit).
    pub fn unproject(&self, p: PixelPoint) -> Option<GeoPoint> {
        let det = self.a * self.d - self.b * self.c;
        if !(det.abs() > f64::EPSILON) {
            return None;
        }
        let (x, y) = (p.x - self.tx, p.y - self.ty);
        Some(GeoPoint::new(
            (self.d * x - self.b * y) / det,
            (self.a * y - self.c * x) / det,
        ))
    }
}

impl From<[f64; 6]> for Transform {
    fn from([a, b, c, d, tx, ty]: [f64; 6]) -> Self {
        Self { a, b, c, d, tx, ty }
    }
}

impl From<Transform> for [f64; 6] {
    fn from(t: Transform) -> Self {
        t.coefficients()
    }
}

/// Project `(lat, lng)` through raw persisted coefficients.
///
/// Returns [`PixelPoint::ZERO`] if `coefficients` is not exactly six values,
/// so a corrupt record draws at the origin instead of failing.
pub fn project(lat: f64, lng: f64, coefficients: &[f64]) -> PixelPoint {
    match Transform::from_coefficients(coefficients) {
        Some(t) => t.project(GeoPoint::new(lat, lng)),
        None => PixelPoint::ZERO,
    }
}
