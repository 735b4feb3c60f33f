//! Least-squares affine fit.
//!
//! Each pixel axis is an independent plane fit `value = A·lat + B·lng + C`.
//! Coordinates are centred on the anchor means first: geographic anchors sit
//! far from the origin (lat ≈ 40, lng ≈ -74) but span a tiny range, and raw
//! sums like `Σlat²` would bury the signal in cancellation error.  With `M`
//! the matrix of centred rows `[lat_c, lng_c, 1]` and `v_c` the centred pixel
//! values, the least-squares solution satisfies the normal equations
//!
//! ```text
//! (MᵀM) β = Mᵀv_c
//!
//!        | Σlat_c²       Σlat_c·lng_c  Σlat_c |        | Σv_c·lat_c |
//! MᵀM =  | Σlat_c·lng_c  Σlng_c²       Σlng_c |  Mᵀv = | Σv_c·lng_c |
//!        | Σlat_c        Σlng_c        n      |        | Σv_c       |
//! ```
//!
//! solved with Cramer's rule.  The offset is recovered as
//! `tx = v̄ + C - A·lat̄ - B·lnḡ`.
//!
//! The system is singular when
//! `det(MᵀM) / (n·Σlat_c²·Σlng_c²)`, which is `1 - r²` for the correlation
//! `r` between latitude and longitude, is not above
//! [`CalibConfig::singular_epsilon`] (collinear or coincident anchors).  A
//! singular axis, or one whose solved coefficients are not finite, falls back
//! to `A = 1, B = 0, C = 0` instead of propagating NaN or ∞.

use crate::{CalibError, CalibResult, CalibrationAnchor, Transform};

/// Fewest anchors that determine an affine transform.
pub const MIN_ANCHORS: usize = 3;

/// Solver configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibConfig {
    /// Smallest accepted scale-free determinant, `1 - r²` between the
    /// centred latitudes and longitudes.  At or below this the anchors are
    /// treated as collinear.
    pub singular_epsilon: f64,
}

impl Default for CalibConfig {
    fn default() -> Self {
        Self { singular_epsilon: 1e-9 }
    }
}

/// A fitted transform plus diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct AffineFit {
    pub transform: Transform,
    /// The x axis used the fallback coefficients.
    pub x_degenerate: bool,
    /// The y axis used the fallback coefficients.
    pub y_degenerate: bool,
    /// Root-mean-square pixel distance between projected and placed anchors.
    pub rms_error_px: f64,
}

impl AffineFit {
    /// `true` if either axis fell back; such a transform should not be
    /// trusted for drawing.
    pub fn is_degenerate(&self) -> bool {
        self.x_degenerate || self.y_degenerate
    }
}

/// Fit a transform to `anchors` with the default configuration.
///
/// Fails only with [`CalibError::InsufficientAnchors`] when fewer than
/// [`MIN_ANCHORS`] are given; degenerate input yields the fallback.
pub fn solve(anchors: &[CalibrationAnchor]) -> CalibResult<Transform> {
    fit(anchors, &CalibConfig::default()).map(|f| f.transform)
}

/// Like [`solve`], also reporting degeneracy and residual error.
pub fn fit(anchors: &[CalibrationAnchor], config: &CalibConfig) -> CalibResult<AffineFit> {
    if anchors.len() < MIN_ANCHORS {
        return Err(CalibError::InsufficientAnchors { got: anchors.len(), need: MIN_ANCHORS });
    }

    let centre = Centre::of(anchors);
    let system = NormalSystem::new(anchors, &centre, config.singular_epsilon);
    let x_fit = system.and_then(|m| m.solve_axis(anchors, &centre, |an| an.x));
    let y_fit = system.and_then(|m| m.solve_axis(anchors, &centre, |an| an.y));

    if x_fit.is_none() || y_fit.is_none() {
        log::warn!(
            "calibration with {} anchors is degenerate (collinear, coincident or non-finite); \
             using fallback for {}",
            anchors.len(),
            match (x_fit.is_none(), y_fit.is_none()) {
                (true, true) => "both axes",
                (true, false) => "x",
                _ => "y",
            }
        );
    }
    let (a, b, tx) = x_fit.unwrap_or((1.0, 0.0, 0.0));
    let (c, d, ty) = y_fit.unwrap_or((1.0, 0.0, 0.0));
    let transform = Transform { a, b, c, d, tx, ty };

    let sq: f64 = anchors
        .iter()
        .map(|an| transform.project(an.geo()).distance_2(an.pixel()))
        .sum();
    let rms_error_px = (sq / anchors.len() as f64).sqrt();

    Ok(AffineFit {
        transform,
        x_degenerate: x_fit.is_none(),
        y_degenerate: y_fit.is_none(),
        rms_error_px,
    })
}

// ── Normal equations ──────────────────────────────────────────────────────────

type Mat3 = [[f64; 3]; 3];

/// Anchor means.
struct Centre {
    lat: f64,
    lng: f64,
    n:   f64,
}

impl Centre {
    fn of(anchors: &[CalibrationAnchor]) -> Self {
        let n = anchors.len() as f64;
        let lat = anchors.iter().map(|an| an.lat).sum::<f64>() / n;
        let lng = anchors.iter().map(|an| an.lng).sum::<f64>() / n;
        Self { lat, lng, n }
    }

    fn mean(&self, anchors: &[CalibrationAnchor], value: &impl Fn(&CalibrationAnchor) -> f64) -> f64 {
        anchors.iter().map(value).sum::<f64>() / self.n
    }
}

/// Centred `MᵀM`, shared by both axes, with its non-zero determinant.
#[derive(Copy, Clone)]
struct NormalSystem {
    m:   Mat3,
    det: f64,
}

impl NormalSystem {
    /// `None` if the anchors do not determine a plane.
    fn new(anchors: &[CalibrationAnchor], centre: &Centre, epsilon: f64) -> Option<Self> {
        let (mut lat2, mut lng2, mut latlng, mut lat, mut lng) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for an in anchors {
            let (la, lo) = (an.lat - centre.lat, an.lng - centre.lng);
            lat2   += la * la;
            lng2   += lo * lo;
            latlng += la * lo;
            lat    += la;
            lng    += lo;
        }
        let m = [
            [lat2,   latlng, lat     ],
            [latlng, lng2,   lng     ],
            [lat,    lng,    centre.n],
        ];
        let det = det3(&m);
        let scale = centre.n * lat2 * lng2;
        // Also rejects NaN from non-finite coordinates.
        if !(det.abs() > epsilon * scale) {
            return None;
        }
        Some(Self { m, det })
    }

    /// Cramer's rule for one pixel axis.  `None` if a coefficient comes out
    /// non-finite (e.g. a NaN pixel value).
    fn solve_axis(
        &self,
        anchors: &[CalibrationAnchor],
        centre:  &Centre,
        value:   impl Fn(&CalibrationAnchor) -> f64,
    ) -> Option<(f64, f64, f64)> {
        let v_mean = centre.mean(anchors, &value);
        let mut rhs = [0.0; 3];
        for an in anchors {
            let v = value(an) - v_mean;
            rhs[0] += v * (an.lat - centre.lat);
            rhs[1] += v * (an.lng - centre.lng);
            rhs[2] += v;
        }

        let a = det3(&with_column(&self.m, 0, rhs)) / self.det;
        let b = det3(&with_column(&self.m, 1, rhs)) / self.det;
        let c = det3(&with_column(&self.m, 2, rhs)) / self.det;
        let offset = v_mean + c - a * centre.lat - b * centre.lng;

        [a, b, offset].iter().all(|k| k.is_finite()).then_some((a, b, offset))
    }
}

fn det3(m: &Mat3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// `m` with column `col` replaced by `v`.
fn with_column(m: &Mat3, col: usize, v: [f64; 3]) -> Mat3 {
    let mut out = *m;
    for (row, &value) in out.iter_mut().zip(v.iter()) {
        row[col] = value;
    }
    out
}
