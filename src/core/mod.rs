pub mod autoscale;
pub mod series;
pub mod transform;
pub mod types;

pub use autoscale::{AutoscaleParams, compute_parameters};
pub use series::Series;
pub use transform::{ScaleParams, inverse_transform, transform};
pub use types::{DrawableBounds, ScreenPoint, Viewport};
