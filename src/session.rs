//! Session-scoped generation with frozen randomness.
//!
//! Each domain draws from its own RNG seeded with `seed ^ salt`, so a
//! repeated request returns the same table and a row limit only truncates.

use rand::Rng;

use crate::biodiversity::get_biodiversity_data;
use crate::climate::get_climate_data;
use crate::common::config::AppCfg;
use crate::common::time;
use crate::ecosystem::get_ecosystem_data;
use crate::pollution::get_pollution_data;
use crate::series::GenContext;
use crate::table::domain::{DataTable, Domain, Year};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Session {
    seed: u64,
    current_year: Year,
}

impl Session {
    /// Session ending at the clock year.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            current_year: time::current_year(),
        }
    }

    pub fn with_current_year(mut self, year: Year) -> Self {
        self.current_year = year;
        self
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn from_cfg(cfg: &AppCfg) -> Self {
        let session = match cfg.seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        };
        match cfg.current_year {
            Some(year) => session.with_current_year(year),
            None => session,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_year(&self) -> Year {
        GenContext::clamp_year(self.current_year)
    }

    /// Fresh context for one domain; identical on every call.
    pub fn context(&self, domain: Domain) -> GenContext {
        GenContext::seeded(self.seed ^ domain.salt(), self.current_year)
    }

    pub fn climate(&self, limit: Option<usize>) -> DataTable {
        get_climate_data(&mut self.context(Domain::Climate), limit)
    }

    pub fn biodiversity(&self, limit: Option<usize>) -> DataTable {
        get_biodiversity_data(&mut self.context(Domain::Biodiversity), limit)
    }

    pub fn pollution(&self, limit: Option<usize>) -> DataTable {
        get_pollution_data(&mut self.context(Domain::Pollution), limit)
    }

    pub fn ecosystem(&self, limit: Option<usize>) -> DataTable {
        get_ecosystem_data(&mut self.context(Domain::Ecosystem), limit)
    }

    pub fn get(&self, domain: Domain, limit: Option<usize>) -> DataTable {
        match domain {
            Domain::Climate => self.climate(limit),
            Domain::Biodiversity => self.biodiversity(limit),
            Domain::Pollution => self.pollution(limit),
            Domain::Ecosystem => self.ecosystem(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(42).with_current_year(2024)
    }

    #[test]
    fn repeated_requests_are_identical() {
        let s = session();
        for domain in Domain::ALL {
            assert_eq!(s.get(domain, None), s.get(domain, None));
        }
    }

    #[test]
    fn limit_only_truncates() {
        let s = session();
        let full = s.pollution(None);
        let head = s.pollution(Some(7));
        assert_eq!(head.rows(), &full.rows()[..7]);
    }

    #[test]
    fn domains_draw_independent_streams() {
        let s = session();
        let a = s.context(Domain::Climate).rng().gen::<u64>();
        let b = s.context(Domain::Pollution).rng().gen::<u64>();
        assert_ne!(a, b);
    }

    #[test]
    fn absurd_years_still_produce_bounded_tables() {
        let s = Session::new(1).with_current_year(i32::MAX);
        assert_eq!(s.current_year(), GenContext::MAX_CURRENT_YEAR);
        for domain in Domain::ALL {
            let head = s.get(domain, Some(1));
            assert_eq!(head.rows()[0].year, GenContext::MAX_CURRENT_YEAR);
        }
        let past = Session::new(1).with_current_year(i32::MIN);
        assert_eq!(past.climate(Some(1)).rows()[0].year, GenContext::MIN_CURRENT_YEAR);
    }

    #[test]
    fn config_pins_seed_and_year() {
        let cfg = AppCfg {
            seed: Some(9),
            current_year: Some(2020),
            log_level: 1,
        };
        let s = Session::from_cfg(&cfg);
        assert_eq!(s.seed(), 9);
        assert_eq!(s.current_year(), 2020);
        assert_eq!(s.climate(Some(1)).rows()[0].year, 2020);
    }
}
