use std::f64::consts::PI;

/// Equal-width histogram. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => {
                (hi - lo) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Midpoint of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin finite `values` into `bins` equal-width bins spanning their range.
/// The last bin is closed on the right. A constant sample gets a unit-wide
/// range centred on its value. `None` for no finite values or zero bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram { edges, counts })
}

/// Gaussian kernel bandwidth by Scott's rule: `std · n^(-1/5)`, with the
/// sample standard deviation. `None` for fewer than two values or no spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();
    if std == 0.0 || !std.is_finite() {
        return None;
    }
    Some(std * n.powf(-0.2))
}

/// Kernel density estimate evaluated at `points` evenly spaced positions
/// between the sample minimum and maximum. Empty when the bandwidth is
/// undefined.
pub fn kde_curve(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(h) = scott_bandwidth(&finite) else {
        return Vec::new();
    };
    if points < 2 {
        return Vec::new();
    }

    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (points - 1) as f64;
    let norm = 1.0 / (finite.len() as f64 * h * (2.0 * PI).sqrt());

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density = finite
                .iter()
                .map(|xi| (-0.5 * ((x - xi) / h).powi(2)).exp())
                .sum::<f64>()
                * norm;
            [x, density]
        })
        .collect()
}
