use super::filter::FilteredView;
use super::model::Metric;

/// Describe-style summary of one metric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    pub const ROW_LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Compute the summary. Empty input gives `count = 0` and NaN elsewhere.
    pub fn of(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Summary {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        Summary {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            q50: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    /// Values in [`Self::ROW_LABELS`] order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Summaries for population, GNI per capita and life expectancy, in that order.
pub fn describe(view: &FilteredView<'_>) -> Vec<(Metric, Summary)> {
    Metric::DESCRIBE_ORDER
        .iter()
        .map(|&m| {
            let values: Vec<f64> = view.rows.iter().map(|r| r.metric(m)).collect();
            (m, Summary::of(&values))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UnifiedRow;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_summary_is_nan() {
        let s = Summary::of(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan() && s.max.is_nan());
    }

    #[test]
    fn single_value_has_nan_std() {
        let s = Summary::of(&[5.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 5.0);
        assert!(s.std.is_nan());
        assert_eq!((s.min, s.q50, s.max), (5.0, 5.0, 5.0));
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let s = Summary::of(&[4.0, 1.0, 3.0, 2.0]);
        assert!(approx(s.mean, 2.5));
        assert!(approx(s.q25, 1.75));
        assert!(approx(s.q50, 2.5));
        assert!(approx(s.q75, 3.25));
        assert!(approx(s.std, (5.0f64 / 3.0).sqrt()));
        assert_eq!((s.min, s.max), (1.0, 4.0));
    }

    #[test]
    fn describe_covers_three_metrics_in_order() {
        let rows = [
            UnifiedRow {
                country: "A".into(),
                year: 2000,
                population: 10.0,
                life_expectancy: 60.0,
                gni_per_capita: 100.0,
            },
            UnifiedRow {
                country: "B".into(),
                year: 2000,
                population: 30.0,
                life_expectancy: 70.0,
                gni_per_capita: 300.0,
            },
        ];
        let view = FilteredView {
            rows: rows.iter().collect(),
        };
        let d = describe(&view);
        let metrics: Vec<_> = d.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            metrics,
            [Metric::Population, Metric::GniPerCapita, Metric::LifeExpectancy]
        );
        assert!(approx(d[0].1.mean, 20.0));
        assert!(approx(d[1].1.mean, 200.0));
        assert!(approx(d[2].1.mean, 65.0));
    }
}
