//! Plausibility review of the user's readings, independent of the fee computation.

use std::{
    fmt::{Display, Formatter},
    ops::RangeInclusive,
};

use serde::Serialize;
use thiserror::Error;

use crate::{demand::AnnualDemand, quantity::power::Kilowatts, tariff::Month};

/// Readings above this are almost certainly typos for a low-voltage contract.
pub const MAX_PLAUSIBLE: Kilowatts = Kilowatts::from_f64(10_000.0);

/// Default demand-to-capacity ratio above which a month is flagged.
pub const SPIKE_RATIO: f64 = 2.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Implausible {
    #[error("contracted capacity {0} exceeds {max}, please double-check the input", max = MAX_PLAUSIBLE)]
    Capacity(Kilowatts),

    #[error("demand {demand} in {month} exceeds {max}, please double-check it", max = MAX_PLAUSIBLE)]
    Demand { month: Month, demand: Kilowatts },
}

pub fn check_plausible(capacity: Kilowatts, demands: &AnnualDemand) -> Result<(), Implausible> {
    if capacity > MAX_PLAUSIBLE {
        return Err(Implausible::Capacity(capacity));
    }
    match demands.iter().find(|(_, demand)| *demand > MAX_PLAUSIBLE) {
        Some((month, demand)) => Err(Implausible::Demand { month, demand }),
        None => Ok(()),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// The month's demand is far above the contracted capacity and gets heavily surcharged.
    Spike { month: Month, demand: Kilowatts },

    /// Even the highest demand stays below half of the contracted capacity.
    Oversized { max_demand: Kilowatts },

    /// The highest demand is more than three times the lowest one.
    WideSpread { min_demand: Kilowatts, max_demand: Kilowatts },
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spike { month, demand } => write!(
                f,
                "{month} demand ({demand}) is far above the contracted capacity and will be surcharged heavily, please double-check it",
            ),
            Self::Oversized { max_demand } => write!(
                f,
                "all monthly demands stay below half of the contracted capacity (max {max_demand}), consider lowering it",
            ),
            Self::WideSpread { min_demand, max_demand } => write!(
                f,
                "highest demand ({max_demand}) and lowest demand ({min_demand}) differ a lot, likely because of the summer season",
            ),
        }
    }
}

pub fn review(capacity: Kilowatts, demands: &AnnualDemand, spike_ratio: f64) -> Vec<Warning> {
    let mut warnings: Vec<Warning> = demands
        .iter()
        .filter(|(_, demand)| *demand > capacity * spike_ratio)
        .map(|(month, demand)| Warning::Spike { month, demand })
        .collect();

    let (min_demand, max_demand) = (demands.min(), demands.max());
    if max_demand < capacity * 0.5 {
        warnings.push(Warning::Oversized { max_demand });
    }
    if min_demand > Kilowatts::ZERO && max_demand / min_demand > 3.0 {
        warnings.push(Warning::WideSpread { min_demand, max_demand });
    }

    warnings
}

/// Rule-of-thumb capacity range: 80% to 130% of the highest demand.
#[must_use]
pub fn suggested_range(demands: &AnnualDemand) -> RangeInclusive<u32> {
    let max_demand = demands.max();
    let lower = (max_demand * 0.8).floor_u32().max(1);
    lower..=(max_demand * 1.3).floor_u32().max(lower)
}
