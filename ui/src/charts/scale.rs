//! Axis scales for the chart scenes.

/// Maps a numeric domain onto a pixel range (range may be inverted for y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Build a scale whose domain is widened to nice tick boundaries.
    /// Returns the scale together with the ticks it was rounded to.
    pub fn nice(min: f64, max: f64, range: (f64, f64), tick_count: usize) -> (Self, Vec<f64>) {
        let ticks = nice_ticks(min, max, tick_count);
        let lo = ticks.first().copied().unwrap_or(min);
        let hi = ticks.last().copied().unwrap_or(max);
        (Self::new((lo, hi), range), ticks)
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Evenly divides a pixel range into `count` categorical bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub range: (f64, f64),
    /// Fraction of each step left empty between bands.
    pub padding: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> Self {
        Self {
            count,
            range,
            padding: padding.clamp(0.0, 0.9),
        }
    }

    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    pub fn start(&self, index: usize) -> f64 {
        self.range.0 + self.step() * index as f64 + self.step() * self.padding / 2.0
    }

    pub fn center(&self, index: usize) -> f64 {
        self.start(index) + self.bandwidth() / 2.0
    }
}

/// Ticks on 1/2/5 multiples of a power of ten covering `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, tick_count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return vec![0.0, 1.0];
    }
    let (mut lo, mut hi) = if min <= max { (min, max) } else { (max, min) };
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        lo -= pad;
        hi += pad;
    }

    let step = nice_step((hi - lo) / tick_count.max(1) as f64);
    let start = (lo / step).floor() * step;
    let end = (hi / step).ceil() * step;
    // Steps below the float spacing at this magnitude cannot be told apart.
    if start + step == start || !(end - start).is_finite() {
        return vec![lo, hi];
    }

    let count = ((end - start) / step).round() as usize;
    if count > MAX_TICKS {
        return vec![start, end];
    }
    (0..=count)
        .map(|i| {
            let value = start + i as f64 * step;
            // Normalise -0.0 and float noise.
            let rounded = (value / step).round() * step;
            if rounded == 0.0 {
                0.0
            } else {
                rounded
            }
        })
        .collect()
}

const MAX_TICKS: usize = 50;

fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Compact tick label: thousands separators dropped in favour of k/M suffixes.
pub fn tick_label(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        trim_decimal(value / 1_000_000.0, "M")
    } else if abs >= 10_000.0 {
        trim_decimal(value / 1_000.0, "k")
    } else if value.fract().abs() < 1e-9 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

fn trim_decimal(value: f64, suffix: &str) -> String {
    let text = format!("{value:.1}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_cover_the_domain_on_nice_steps() {
        let ticks = nice_ticks(3.0, 97.0, 5);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(100.0));
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let ticks = nice_ticks(5.0, 5.0, 4);
        assert!(ticks.len() >= 2);
        assert!(ticks.first().copied().unwrap() < 5.0);
        assert!(ticks.last().copied().unwrap() > 5.0);
    }

    #[test]
    fn huge_magnitudes_with_a_tiny_spread_stay_bounded() {
        let ticks = nice_ticks(1e17, 1e17 + 16.0, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= MAX_TICKS + 1);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn tick_count_is_capped() {
        let ticks = nice_ticks(0.0, 1e6, 10_000);
        assert!(ticks.len() <= MAX_TICKS + 1);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(1e6));
    }

    #[test]
    fn linear_scale_inverts_for_y_axes() {
        let scale = LinearScale::new((0.0, 100.0), (250.0, 50.0));
        assert_eq!(scale.map(0.0), 250.0);
        assert_eq!(scale.map(100.0), 50.0);
        assert_eq!(scale.map(50.0), 150.0);
    }

    #[test]
    fn band_scale_splits_range() {
        let bands = BandScale::new(4, (0.0, 400.0), 0.2);
        assert_eq!(bands.step(), 100.0);
        assert!((bands.bandwidth() - 80.0).abs() < 1e-9);
        assert!((bands.start(1) - 110.0).abs() < 1e-9);
        assert!((bands.center(0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn tick_labels_are_compact() {
        assert_eq!(tick_label(30_000.0), "30k");
        assert_eq!(tick_label(1_500_000.0), "1.5M");
        assert_eq!(tick_label(250.0), "250");
        assert_eq!(tick_label(0.25), "0.25");
    }
}
