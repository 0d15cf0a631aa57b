use serde::Serialize;

use crate::{error::InvalidInput, quantity::power::Kilowatts, tariff::Month};

/// Monthly peak demands of one year, January first.
///
/// Guaranteed to hold exactly 12 finite non-negative readings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[must_use]
pub struct AnnualDemand([Kilowatts; 12]);

impl AnnualDemand {
    pub fn iter(&self) -> impl Iterator<Item = (Month, Kilowatts)> + '_ {
        Month::iter().zip(self.0.iter().copied())
    }

    pub fn get(&self, month: Month) -> Kilowatts {
        self.0[month.index()]
    }

    pub fn min(&self) -> Kilowatts {
        self.0.iter().copied().min().unwrap_or(Kilowatts::ZERO)
    }

    pub fn max(&self) -> Kilowatts {
        self.0.iter().copied().max().unwrap_or(Kilowatts::ZERO)
    }
}

impl TryFrom<&[Kilowatts]> for AnnualDemand {
    type Error = InvalidInput;

    fn try_from(demands: &[Kilowatts]) -> Result<Self, Self::Error> {
        let demands: [Kilowatts; 12] =
            demands.try_into().map_err(|_| InvalidInput::WrongLength(demands.len()))?;
        for (month, demand) in Month::iter().zip(demands) {
            check_demand(month, demand)?;
        }
        Ok(Self(demands))
    }
}

impl TryFrom<[Kilowatts; 12]> for AnnualDemand {
    type Error = InvalidInput;

    fn try_from(demands: [Kilowatts; 12]) -> Result<Self, Self::Error> {
        Self::try_from(demands.as_slice())
    }
}

/// Check a single month's reading.
pub(crate) fn check_demand(month: Month, demand: Kilowatts) -> Result<(), InvalidInput> {
    // `OrderedFloat` sorts NaN above everything, so compare the raw value:
    if !demand.is_finite() {
        Err(InvalidInput::NonFiniteDemand { month })
    } else if demand.into_inner() < 0.0 {
        Err(InvalidInput::NegativeDemand { month, demand })
    } else {
        Ok(())
    }
}
