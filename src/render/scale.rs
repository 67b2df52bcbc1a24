//! Scales, ticks and color ramps for chart layout.

use super::aesthetics::Rgb;

/// Maps a continuous domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range. A degenerate domain maps
    /// everything to the middle of the range.
    pub fn apply(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (x - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: f64) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![lo];
        }
        // sub-unit steps go through the integer inverse to keep ticks exact
        if step < 1.0 {
            let inv = (1.0 / step).round();
            let mut i1 = (lo * inv).round();
            let mut i2 = (hi * inv).round();
            if i1 / inv < lo {
                i1 += 1.0;
            }
            if i2 / inv > hi {
                i2 -= 1.0;
            }
            ((i1 as i64)..=(i2 as i64)).map(|i| i as f64 / inv).collect()
        } else {
            let mut i1 = (lo / step).round();
            let mut i2 = (hi / step).round();
            if i1 * step < lo {
                i1 += 1.0;
            }
            if i2 * step > hi {
                i2 -= 1.0;
            }
            ((i1 as i64)..=(i2 as i64)).map(|i| i as f64 * step).collect()
        }
    }

    /// Tick step used by [`LinearScale::ticks`] for `count`.
    pub fn tick_step(&self, count: f64) -> f64 {
        let (lo, hi) = ordered(self.domain);
        tick_step(lo, hi, count)
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A 1, 2 or 5 times power-of-ten step splitting `[start, stop]` into
/// about `count` intervals.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let span = stop - start;
    if span <= 0.0 || count <= 0.0 {
        return 0.0;
    }
    let raw = span / count;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Format a fraction as a percentage with just enough decimals for `step`.
pub fn format_percent(x: f64, step: f64) -> String {
    let decimals = if step > 0.0 {
        (-(step * 100.0).log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let value = x * 100.0;
    // avoid "-0%"
    let value = if value.abs() < 0.5 * 10f64.powi(-(decimals as i32)) {
        0.0
    } else {
        value
    };
    format!("{:.*}%", decimals, value)
}

/// Evenly divides a pixel range into `n` bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    n: usize,
    range: (f64, f64),
    padding: f64,
    round: bool,
}

impl BandScale {
    pub fn new(n: usize, range: (f64, f64)) -> Self {
        Self {
            n,
            range,
            padding: 0.0,
            round: false,
        }
    }

    /// Inner and outer padding as a fraction of the step.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding.clamp(0.0, 1.0);
        self
    }

    /// Snap step and offsets to whole pixels.
    pub fn round(mut self) -> Self {
        self.round = true;
        self
    }

    fn layout(&self) -> (f64, f64) {
        let (r0, r1) = self.range;
        let n = self.n as f64;
        let mut step = (r1 - r0) / (n - self.padding + 2.0 * self.padding).max(1.0);
        if self.round {
            step = step.floor();
        }
        let mut start = r0 + (r1 - r0 - step * (n - self.padding)) / 2.0;
        if self.round {
            start = start.round();
        }
        (start, step)
    }

    pub fn step(&self) -> f64 {
        self.layout().1
    }

    pub fn bandwidth(&self) -> f64 {
        let bw = self.step() * (1.0 - self.padding);
        if self.round {
            bw.round()
        } else {
            bw
        }
    }

    /// Left edge of band `i`.
    pub fn position(&self, i: usize) -> f64 {
        let (start, step) = self.layout();
        start + step * i as f64
    }

    /// Centre of band `i`.
    pub fn center(&self, i: usize) -> f64 {
        self.position(i) + self.bandwidth() / 2.0
    }
}

/// Anchors of the inferno colormap at t = 0, 0.1, ..., 1.
const INFERNO: [Rgb; 11] = [
    Rgb::new(0x00, 0x00, 0x04),
    Rgb::new(0x16, 0x0b, 0x39),
    Rgb::new(0x42, 0x0a, 0x68),
    Rgb::new(0x6a, 0x17, 0x6e),
    Rgb::new(0x93, 0x26, 0x67),
    Rgb::new(0xbc, 0x37, 0x54),
    Rgb::new(0xdd, 0x51, 0x3a),
    Rgb::new(0xf3, 0x78, 0x19),
    Rgb::new(0xfc, 0xa5, 0x0a),
    Rgb::new(0xf6, 0xd7, 0x46),
    Rgb::new(0xfc, 0xff, 0xa4),
];

/// Sample the inferno colormap at `t` in `[0, 1]`.
pub fn inferno(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (INFERNO.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    if lo >= INFERNO.len() - 1 {
        return INFERNO[INFERNO.len() - 1];
    }
    INFERNO[lo].lerp(INFERNO[lo + 1], scaled - lo as f64)
}

/// `n` evenly spaced inferno colors, darkest first.
pub fn inferno_ramp(n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![inferno(0.0)],
        _ => (0..n).map(|i| inferno(i as f64 / (n - 1) as f64)).collect(),
    }
}

/// `10^k` rendered as an integer label.
pub fn power_of_ten_label(k: u32) -> String {
    format!("1{}", "0".repeat(k as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_apply() {
        let s = LinearScale::new((-1.0, 1.0), (0.0, 200.0));
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.apply(-1.0), 0.0);
        assert_eq!(LinearScale::new((2.0, 2.0), (0.0, 10.0)).apply(7.0), 5.0);
    }

    #[test]
    fn test_ticks() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        assert_eq!(s.ticks(5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);

        let s = LinearScale::new((-0.03, 0.03), (0.0, 300.0));
        let ticks = s.ticks(4.5);
        assert_relative_eq!(s.tick_step(4.5), 0.01, epsilon = 1e-12);
        assert_eq!(ticks.len(), 7);
        assert_relative_eq!(ticks[0], -0.03);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.25, 0.05), "25%");
        assert_eq!(format_percent(0.0126, 0.005), "1.3%");
        assert_eq!(format_percent(-0.0, 0.01), "0%");
        assert_eq!(format_percent(-0.02, 0.01), "-2%");
    }

    #[test]
    fn test_band_scale() {
        let b = BandScale::new(20, (0.0, 200.0)).round();
        assert_eq!(b.step(), 10.0);
        assert_eq!(b.bandwidth(), 10.0);
        assert_eq!(b.position(3), 30.0);

        let b = BandScale::new(4, (-40.0, 210.0)).round();
        assert_eq!(b.step(), 62.0);
        assert_eq!(b.position(0), -39.0);
        assert_eq!(b.center(0), -8.0);
    }

    #[test]
    fn test_inferno() {
        assert_eq!(inferno(0.0).hex(), "#000004");
        assert_eq!(inferno(1.0).hex(), "#fcffa4");
        assert_eq!(inferno(0.5).hex(), "#bc3754");
        let ramp = inferno_ramp(20);
        assert_eq!(ramp.len(), 20);
        assert_eq!(ramp[0], inferno(0.0));
        assert_eq!(ramp[19], inferno(1.0));
    }

    #[test]
    fn test_power_of_ten_label() {
        assert_eq!(power_of_ten_label(0), "1");
        assert_eq!(power_of_ten_label(3), "1000");
    }
}
