use crate::error::{ChartError, ChartResult};

/// Vertical offset and span that let a series fill the drawable height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoscaleParams {
    /// Minimum value when any value is negative, otherwise `0`.
    pub offset: f64,
    /// `max(|y|) + |offset|`.
    pub span: f64,
}

/// Derives autoscale parameters from the y values.
///
/// The offset starts at zero and only ever moves down, so an all-positive
/// series keeps its zero baseline.
pub fn compute_parameters(values: &[f64]) -> ChartResult<AutoscaleParams> {
    if values.is_empty() {
        return Err(ChartError::InvalidSeries(
            "autoscale requires at least one value".to_owned(),
        ));
    }

    let mut offset = 0.0_f64;
    let mut peak_magnitude = 0.0_f64;
    for &value in values {
        peak_magnitude = peak_magnitude.max(value.abs());
        if value < offset {
            offset = value;
        }
    }

    Ok(AutoscaleParams {
        offset,
        span: peak_magnitude + offset.abs(),
    })
}
