use crate::color::ColorMap;
use crate::report::StageCounts;
use crate::stats::distribution::{histogram, kde_curve, Histogram};
use crate::stats::grouping::GroupMean;

/// Points on the density curve.
const DENSITY_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Chart state
// ---------------------------------------------------------------------------

/// Everything the chart window draws, computed once before it opens.
pub struct ChartState {
    /// Engagement ratio histogram (None when no ratio is present).
    pub histogram: Option<Histogram>,

    /// Density curve scaled to histogram counts.
    pub density: Vec<[f64; 2]>,

    /// Mean interaction rate per post type, highest first.
    pub groups: Vec<GroupMean>,

    /// One colour per post type.
    pub color_map: ColorMap,

    /// Row counts per stage, shown in the top bar.
    pub counts: StageCounts,
}

impl ChartState {
    pub fn new(ratios: &[f64], bins: usize, groups: Vec<GroupMean>, counts: StageCounts) -> Self {
        let histogram = histogram(ratios, bins);

        // Density integrates to 1; multiplying by n · bin width puts it on the
        // count axis of the histogram.
        let density = match &histogram {
            Some(h) => {
                let scale = h.total() as f64 * h.bin_width();
                kde_curve(ratios, DENSITY_POINTS)
                    .into_iter()
                    .map(|[x, y]| [x, y * scale])
                    .collect()
            }
            None => Vec::new(),
        };

        let color_map = ColorMap::new(groups.iter().map(|g| g.key.as_str()));

        Self {
            histogram,
            density,
            groups,
            color_map,
            counts,
        }
    }

    pub fn has_data(&self) -> bool {
        self.histogram.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> StageCounts {
        StageCounts {
            loaded: 4,
            cleaned: 4,
            selected: 4,
            engineered: 4,
        }
    }

    #[test]
    fn density_is_on_the_count_scale() {
        let ratios: Vec<f64> = (0..100).map(|i| f64::from(i) / 100.0).collect();
        let state = ChartState::new(&ratios, 10, Vec::new(), counts());

        let h = state.histogram.as_ref().unwrap();
        assert_eq!(h.counts.len(), 10);
        assert_eq!(state.density.len(), DENSITY_POINTS);

        // Area under the scaled curve is close to n · bin width.
        let step = state.density[1][0] - state.density[0][0];
        let area: f64 = state.density.iter().map(|p| p[1] * step).sum();
        let expected = 100.0 * h.bin_width();
        assert!(area > 0.8 * expected && area < 1.01 * expected, "{area} vs {expected}");
    }

    #[test]
    fn no_ratios_means_no_chart() {
        let state = ChartState::new(&[], 30, Vec::new(), counts());
        assert!(!state.has_data());
        assert!(state.density.is_empty());
    }
}
