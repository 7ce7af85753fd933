use crate::config::TICK_COUNT;
use crate::model::Millis;
use crate::ticks::time_ticks;

/// Linear map between a time domain (ms) and a horizontal pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_domain(&mut self, min: f64, max: f64) {
        self.domain = (min, max);
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        self.range = (start, end);
    }

    /// Domain time → pixel x.
    pub fn map(&self, time: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (time - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel x → domain time.
    pub fn invert(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (x - r0) / (r1 - r0) * (d1 - d0)
    }

    /// UTC-aligned tick times across the domain, about `TICK_COUNT` of them.
    pub fn ticks(&self) -> Vec<Millis> {
        self.ticks_with_count(TICK_COUNT)
    }

    pub fn ticks_with_count(&self, count: usize) -> Vec<Millis> {
        time_ticks(self.domain.0, self.domain.1, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_invert() {
        let s = TimeScale::new((1000.0, 2000.0), (140.0, 740.0));
        assert!((s.map(1000.0) - 140.0).abs() < 1e-9);
        assert!((s.map(1500.0) - 440.0).abs() < 1e-9);
        assert!((s.invert(440.0) - 1500.0).abs() < 1e-9);
        assert!((s.invert(s.map(1234.5)) - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let s = TimeScale::new((5.0, 5.0), (0.0, 100.0));
        assert!((s.map(5.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn ticks_cover_domain() {
        let s = TimeScale::new((1000.0, 2000.0), (140.0, 740.0));
        let ticks = s.ticks();
        assert_eq!(ticks.first(), Some(&1000));
        assert_eq!(ticks.last(), Some(&2000));
    }
}
