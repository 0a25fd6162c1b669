//! Advisory daily request budget for the free-tier geocoder.

use std::sync::Mutex;

use time::{Date, OffsetDateTime};

/// Safety margin under the geocoder's undocumented ~2,500/day quota.
pub const DEFAULT_MAX_DAILY_BUDGET: u32 = 2_400;

/// Budget configuration for a [`RateGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateGateConfig {
    pub max_daily_budget: u32,
}

impl Default for RateGateConfig {
    fn default() -> Self {
        Self {
            max_daily_budget: DEFAULT_MAX_DAILY_BUDGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RateBudget {
    count_today: u32,
    day_key: Date,
}

/// In-process counter tracking a rolling daily request budget.
///
/// Advisory only: the counter is not persisted across restarts, an
/// acceptable approximation since the external quota is generous and
/// itself approximate. A denial tells the caller to skip the network tier
/// and use the next fallback, never to wait or retry.
#[derive(Debug)]
pub struct RateGate {
    config: RateGateConfig,
    inner: Mutex<RateBudget>,
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(RateGateConfig::default())
    }
}

impl RateGate {
    pub fn new(config: RateGateConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(RateBudget {
                count_today: 0,
                day_key: today_utc(),
            }),
        }
    }

    /// Consume one unit of today's budget if any remains.
    pub fn try_consume(&self) -> bool {
        self.try_consume_at(today_utc())
    }

    /// Day-parameterized variant used by simulations and tests.
    ///
    /// If `today` differs from the stored day key the counter resets
    /// before the grant check.
    pub fn try_consume_at(&self, today: Date) -> bool {
        let mut budget = self
            .inner
            .lock()
            .expect("rate budget lock is not poisoned");

        if budget.day_key != today {
            budget.count_today = 0;
            budget.day_key = today;
        }

        if budget.count_today < self.config.max_daily_budget {
            budget.count_today += 1;
            true
        } else {
            false
        }
    }

    /// Remaining grants for the current day, without consuming one.
    pub fn remaining_today(&self) -> u32 {
        let budget = self
            .inner
            .lock()
            .expect("rate budget lock is not poisoned");

        if budget.day_key != today_utc() {
            return self.config.max_daily_budget;
        }
        self.config.max_daily_budget.saturating_sub(budget.count_today)
    }
}

fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
