//! Compounding-rate series with per-year rate noise.
//!
//! `value(y) = base * (1 ± r_eff(y))^(y - y0)` where
//! `r_eff(y) = max(0, r * decay(y - y0) + N(0, sigma))` is redrawn every year.
//! Chained series instead apply one year's factor to the previous value.

use rand::Rng;
use tracing::debug;

use crate::common::error::{PulseError, PulseResult};
use crate::table::domain::{Year, YearRange};

use super::noise::gaussian;

/// Sign of the compounding factor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Growth,
    Decline,
}

/// How yearly factors accumulate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Compounding {
    /// Exponent over elapsed years with the current year's rate.
    FromBase,
    /// Product of every year's factor since the start year.
    Chained,
}

/// Deterministic damping of the base rate: `max(floor, 1 - per_year * elapsed)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RateDecay {
    pub per_year: f64,
    pub floor: f64,
}

impl RateDecay {
    pub fn factor(&self, elapsed: i32) -> f64 {
        (1.0 - self.per_year * f64::from(elapsed)).max(self.floor)
    }
}

/// Rate and noise that take over from a given year on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Regime {
    pub from_year: Year,
    pub rate: f64,
    pub sigma: f64,
}

/// One generated observation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub year: Year,
    pub elapsed: i32,
    pub value: f64,
    /// Rate applied for this year after noise and clamping.
    pub effective_rate: f64,
}

/// Parameters of a single synthetic series.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompoundingSeries {
    pub base: f64,
    pub rate: f64,
    pub sigma: f64,
    pub direction: Direction,
    pub compounding: Compounding,
    pub years: YearRange,
    pub decay: Option<RateDecay>,
    pub regime: Option<Regime>,
}

impl CompoundingSeries {
    pub fn growth(base: f64, rate: f64, sigma: f64, years: YearRange) -> Self {
        Self {
            base,
            rate,
            sigma,
            direction: Direction::Growth,
            compounding: Compounding::FromBase,
            years,
            decay: None,
            regime: None,
        }
    }

    pub fn decline(base: f64, rate: f64, sigma: f64, years: YearRange) -> Self {
        Self {
            direction: Direction::Decline,
            ..Self::growth(base, rate, sigma, years)
        }
    }

    pub fn chained(mut self) -> Self {
        self.compounding = Compounding::Chained;
        self
    }

    pub fn with_decay(mut self, per_year: f64, floor: f64) -> Self {
        self.decay = Some(RateDecay { per_year, floor });
        self
    }

    pub fn with_regime(mut self, from_year: Year, rate: f64, sigma: f64) -> Self {
        self.regime = Some(Regime {
            from_year,
            rate,
            sigma,
        });
        self
    }

    /// Reject parameters the model cannot represent.
    pub fn validate(&self) -> PulseResult<()> {
        if self.years.is_empty() {
            return Err(PulseError::invalid(format!(
                "empty year range {}..={}",
                self.years.start, self.years.end
            )));
        }
        let finite = [self.base, self.rate, self.sigma];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(PulseError::invalid("series parameters must be finite"));
        }
        check_rate(self.rate, self.sigma)?;
        if let Some(regime) = &self.regime {
            if !regime.rate.is_finite() || !regime.sigma.is_finite() {
                return Err(PulseError::invalid("regime parameters must be finite"));
            }
            check_rate(regime.rate, regime.sigma)?;
        }
        if let Some(decay) = &self.decay {
            if !(decay.per_year.is_finite() && decay.per_year >= 0.0) {
                return Err(PulseError::invalid("decay per year must be non-negative"));
            }
            if !(0.0..=1.0).contains(&decay.floor) {
                return Err(PulseError::invalid("decay floor must lie in [0, 1]"));
            }
        }
        Ok(())
    }

    /// Validate, then sample.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> PulseResult<Vec<SeriesPoint>> {
        self.validate()?;
        Ok(self.sample(rng))
    }

    /// Sample without validation. Callers own the parameters and know them
    /// to be valid; invalid inputs yield meaningless values, never a panic.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SeriesPoint> {
        let mut points = Vec::with_capacity(self.years.len());
        let mut running = self.base;
        for year in self.years.iter() {
            let elapsed = year - self.years.start;
            let (rate, sigma) = match &self.regime {
                Some(r) if year >= r.from_year => (r.rate, r.sigma),
                _ => (self.rate, self.sigma),
            };
            let damped = rate * self.decay.map_or(1.0, |d| d.factor(elapsed));
            let mut effective = (damped + gaussian(rng, sigma)).max(0.0);
            if self.direction == Direction::Decline {
                effective = effective.min(1.0);
            }
            let factor = match self.direction {
                Direction::Growth => 1.0 + effective,
                Direction::Decline => 1.0 - effective,
            };
            let value = match self.compounding {
                Compounding::FromBase => self.base * factor.powi(elapsed),
                Compounding::Chained if elapsed == 0 => {
                    effective = 0.0;
                    self.base
                }
                Compounding::Chained => {
                    running *= factor;
                    running
                }
            };
            points.push(SeriesPoint {
                year,
                elapsed,
                value,
                effective_rate: effective,
            });
        }
        debug!(
            start = self.years.start,
            end = self.years.end,
            points = points.len(),
            "series generated"
        );
        points
    }
}

fn check_rate(rate: f64, sigma: f64) -> PulseResult<()> {
    if rate < 0.0 {
        return Err(PulseError::invalid(format!("rate {rate} is negative")));
    }
    if sigma < 0.0 {
        return Err(PulseError::invalid(format!("sigma {sigma} is negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn noiseless_growth_is_exact() {
        let s = CompoundingSeries::growth(100.0, 0.1, 0.0, YearRange::new(2000, 2002));
        let values: Vec<f64> = s.generate(&mut rng()).unwrap().iter().map(|p| p.value).collect();
        assert!((values[0] - 100.0).abs() < 1e-9);
        assert!((values[1] - 110.0).abs() < 1e-9);
        assert!((values[2] - 121.0).abs() < 1e-9);
    }

    #[test]
    fn noiseless_decline_is_exact() {
        let s = CompoundingSeries::decline(1000.0, 0.01, 0.0, YearRange::new(2000, 2001));
        let points = s.generate(&mut rng()).unwrap();
        assert!((points[1].value - 990.0).abs() < 1e-9);
        assert!((points[1].effective_rate - 0.01).abs() < 1e-12);
    }

    #[test]
    fn chained_applies_regime_and_zero_first_change() {
        let s = CompoundingSeries::decline(100.0, 0.1, 0.0, YearRange::new(2008, 2011))
            .chained()
            .with_regime(2010, 0.5, 0.0);
        let points = s.generate(&mut rng()).unwrap();
        assert_eq!(points[0].effective_rate, 0.0);
        assert!((points[1].value - 90.0).abs() < 1e-9);
        assert!((points[2].value - 45.0).abs() < 1e-9);
        assert!((points[3].value - 22.5).abs() < 1e-9);
    }

    #[test]
    fn decay_damps_the_rate() {
        let s = CompoundingSeries::growth(1.0, 0.2, 0.0, YearRange::new(0, 100))
            .with_decay(0.01, 0.5);
        let points = s.generate(&mut rng()).unwrap();
        assert!((points[10].effective_rate - 0.18).abs() < 1e-12);
        assert!((points[80].effective_rate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn effective_rate_never_negative() {
        let s = CompoundingSeries::growth(10.0, 0.001, 0.5, YearRange::new(1900, 2000));
        for p in s.generate(&mut rng()).unwrap() {
            assert!(p.effective_rate >= 0.0);
            assert!(p.value >= 10.0);
        }
    }

    #[test]
    fn same_seed_same_series() {
        let s = CompoundingSeries::growth(5200.0, 0.03, 0.005, YearRange::new(2000, 2024));
        assert_eq!(s.generate(&mut rng()).unwrap(), s.generate(&mut rng()).unwrap());
    }

    #[test]
    fn invalid_parameters_are_errors() {
        let years = YearRange::new(2000, 2010);
        let cases = [
            CompoundingSeries::growth(f64::NAN, 0.1, 0.0, years),
            CompoundingSeries::growth(1.0, -0.1, 0.0, years),
            CompoundingSeries::growth(1.0, 0.1, -1.0, years),
            CompoundingSeries::growth(1.0, 0.1, 0.0, YearRange::new(2010, 2000)),
            CompoundingSeries::growth(1.0, 0.1, 0.0, years).with_decay(0.1, 2.0),
            CompoundingSeries::growth(1.0, 0.1, 0.0, years).with_regime(2005, f64::INFINITY, 0.0),
        ];
        for case in cases {
            assert!(matches!(
                case.generate(&mut rng()),
                Err(PulseError::InvalidInput(_))
            ));
        }
    }
}
