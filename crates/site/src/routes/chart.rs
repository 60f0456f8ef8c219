//! Server-rendered bar charts.
//!
//! Bars are sized with `h-N` / `w-N` utility classes (N in steps of 5) from
//! `main.css`; inline `style` attributes are blocked by the CSP.

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    /// Formatted value shown on the bar.
    pub value: String,
    /// Size class step, `0..=100` in multiples of 5.
    pub size: u8,
}

/// Size a series of values against the largest one.
pub fn bars<L: Into<String>>(
    points: impl IntoIterator<Item = (L, f64)>,
    format: impl Fn(f64) -> String,
) -> Vec<Bar> {
    let points: Vec<(String, f64)> = points.into_iter().map(|(l, v)| (l.into(), v)).collect();
    let max = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    points
        .into_iter()
        .map(|(label, value)| Bar {
            label,
            value: format(value),
            size: size_step(value, max),
        })
        .collect()
}

/// Share of `total` as a size step (for stacked percentage bars).
#[must_use]
pub fn size_step(value: f64, total: f64) -> u8 {
    if !(value > 0.0 && total > 0.0) {
        return 0;
    }
    let percent = (value / total * 100.0).clamp(0.0, 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let step = ((percent / 5.0).round() as u8) * 5;
    step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_scale_to_largest() {
        let chart = bars([("Current", 299_000.0), ("Optimized", 318_060.0)], |v| {
            format!("{v:.0}")
        });
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].size, 95);
        assert_eq!(chart[1].size, 100);
        assert_eq!(chart[1].value, "318060");
    }

    #[test]
    fn test_negative_and_empty_values() {
        assert_eq!(size_step(-10.0, 100.0), 0);
        assert_eq!(size_step(10.0, 0.0), 0);
        assert_eq!(size_step(f64::NAN, 100.0), 0);
        assert_eq!(size_step(250.0, 100.0), 100);
    }
}
