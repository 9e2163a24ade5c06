use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordered x/y samples plotted by a chart.
///
/// A `Series` is always non-empty, has matching x/y lengths, finite values
/// and non-decreasing x. It is replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries", into = "RawSeries")]
pub struct Series {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Series {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> ChartResult<Self> {
        validate_series(&xs, &ys)?;
        Ok(Self { xs, ys })
    }

    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> (f64, f64) {
        (self.xs[0], self.ys[0])
    }

    /// `x[last] - x[first]`; zero for a single sample or constant x.
    #[must_use]
    pub fn x_span(&self) -> f64 {
        self.xs[self.xs.len() - 1] - self.xs[0]
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.xs, self.ys)
    }
}

fn validate_series(xs: &[f64], ys: &[f64]) -> ChartResult<()> {
    if xs.is_empty() || ys.is_empty() {
        return Err(ChartError::InvalidSeries(
            "series must contain at least one sample".to_owned(),
        ));
    }
    if xs.len() != ys.len() {
        return Err(ChartError::InvalidSeries(format!(
            "x/y length mismatch: {} x values, {} y values",
            xs.len(),
            ys.len()
        )));
    }
    if let Some(index) = xs.iter().chain(ys).position(|value| !value.is_finite()) {
        let (axis, index) = if index < xs.len() {
            ("x", index)
        } else {
            ("y", index - xs.len())
        };
        return Err(ChartError::InvalidSeries(format!(
            "{axis}[{index}] must be finite"
        )));
    }
    if let Some(index) = xs.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(ChartError::InvalidSeries(format!(
            "x must be non-decreasing: x[{}]={} < x[{}]={}",
            index + 1,
            xs[index + 1],
            index,
            xs[index]
        )));
    }
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct RawSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl TryFrom<RawSeries> for Series {
    type Error = ChartError;

    fn try_from(raw: RawSeries) -> ChartResult<Self> {
        Series::new(raw.xs, raw.ys)
    }
}

impl From<Series> for RawSeries {
    fn from(series: Series) -> Self {
        Self {
            xs: series.xs,
            ys: series.ys,
        }
    }
}
