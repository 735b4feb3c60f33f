//! `rr-calib` — fit a map image to geographic coordinates.
//!
//! The user pins three or more known nodes on the map image.  Each pin is a
//! [`CalibrationAnchor`] pairing a `(lat, lng)` with an image pixel `(x, y)`.
//! [`solve`] fits the affine [`Transform`]
//!
//! ```text
//! x = a·lat + b·lng + tx
//! y = c·lat + d·lng + ty
//! ```
//!
//! by two independent least-squares regressions, each reduced to a 3x3
//! normal-equations system and solved with Cramer's rule.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`anchor`]    | `CalibrationAnchor`, `AnchorSet`                           |
//! | [`transform`] | `Transform`, `PixelPoint`, free [`project`]                |
//! | [`solver`]    | `solve`, `fit`, `AffineFit`, `CalibConfig`                 |
//! | [`viewport`]  | Aspect-fit view ↔ image pixel mapping                      |
//! | [`record`]    | `Calibration` — the per-map record a caller persists       |
//! | [`loader`]    | CSV anchor loading                                         |
//! | [`error`]     | `CalibError`, `CalibResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod anchor;
pub mod error;
pub mod loader;
pub mod record;
pub mod solver;
pub mod transform;
pub mod viewport;


pub use anchor::{AnchorSet, CalibrationAnchor};
pub use error::{CalibError, CalibResult};
pub use loader::{load_anchors_csv, load_anchors_reader};
pub use record::Calibration;
pub use solver::{AffineFit, CalibConfig, MIN_ANCHORS, fit, solve};
pub use transform::{PixelPoint, Transform, project};
pub use viewport::{Size, image_to_view, view_to_image};
