//! Explicit random source and clock for one generation run.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::time;
use crate::table::domain::{Year, YearRange};

/// Owned RNG plus the last year to generate.
pub struct GenContext {
    rng: StdRng,
    current_year: Year,
}

impl GenContext {
    /// Earliest accepted current year; keeps every domain range non-empty.
    pub const MIN_CURRENT_YEAR: Year = 2010;
    /// Latest accepted current year; bounds the longest series (1880 on).
    pub const MAX_CURRENT_YEAR: Year = 2200;

    /// Pin `year` into `MIN_CURRENT_YEAR..=MAX_CURRENT_YEAR`.
    pub fn clamp_year(year: Year) -> Year {
        year.clamp(Self::MIN_CURRENT_YEAR, Self::MAX_CURRENT_YEAR)
    }

    pub fn seeded(seed: u64, current_year: Year) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current_year: Self::clamp_year(current_year),
        }
    }

    /// Fresh entropy and the wall-clock year.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            current_year: Self::clamp_year(time::current_year()),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn current_year(&self) -> Year {
        self.current_year
    }

    /// `start..=current_year`.
    pub fn years_from(&self, start: Year) -> YearRange {
        YearRange::new(start, self.current_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_year_is_clamped() {
        let ctx = GenContext::seeded(1, 1999);
        assert_eq!(ctx.current_year(), GenContext::MIN_CURRENT_YEAR);
        assert_eq!(ctx.years_from(2000).len(), 11);
    }

    #[test]
    fn far_future_year_is_capped() {
        let ctx = GenContext::seeded(1, i32::MAX);
        assert_eq!(ctx.current_year(), GenContext::MAX_CURRENT_YEAR);
        assert_eq!(ctx.years_from(1880).len(), 321);
    }

    #[test]
    fn entropy_context_uses_clock() {
        let ctx = GenContext::from_entropy();
        assert!(ctx.current_year() >= 2024);
    }
}
