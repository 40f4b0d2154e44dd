//! Per-window min-max scaling. Bounds are refit on every call and never cached,
//! so one raw value can map to different outputs depending on its neighbours.

/// Window rescaled into [0, 1], one f32 per timestep (single feature channel).
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledWindow {
    values: Vec<f32>,
}

impl ScaledWindow {
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Map each `v` to `(v - min) / (max - min)`. A constant window maps to all zeros.
pub fn scale_min_max(samples: &[f64]) -> ScaledWindow {
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let values = if samples.is_empty() || range == 0.0 {
        vec![0.0; samples.len()]
    } else if range.is_finite() {
        samples
            .iter()
            .map(|&v| ((v - min) / range) as f32)
            .collect()
    } else {
        // Bounds of opposite sign near f64::MAX overflow the subtraction.
        let half_range = max / 2.0 - min / 2.0;
        samples
            .iter()
            .map(|&v| ((v / 2.0 - min / 2.0) / half_range) as f32)
            .collect()
    };
    ScaledWindow { values }
}
