//! Fixed-rate, non-time-of-use, low-voltage base fee tariff.

use std::fmt::{Display, Formatter};

use bon::Builder;
use enumset::{EnumSet, EnumSetType, enum_set};
use serde::{Deserialize, Serialize};

use crate::{
    error::{InvalidInput, InvalidTariff},
    quantity::rate::KilowattRate,
};

#[derive(Debug, Hash, Ord, PartialOrd, Deserialize, Serialize, EnumSetType)]
#[enumset(serialize_repr = "list")]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Calendar order, January first.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Month number within `1..=12`.
    #[must_use]
    pub const fn number(self) -> u32 {
        self as u32
    }

    /// Zero-based position in a demand year.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u32> for Month {
    type Error = InvalidInput;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index as usize))
            .copied()
            .ok_or(InvalidInput::MonthOutOfRange(number))
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        };
        f.pad(name)
    }
}

/// Surcharge on demand exceeding the contracted capacity.
///
/// The first `allowance` share of the capacity is billed at `within_multiplier` times the rate,
/// anything above it at `beyond_multiplier` times the rate. The tiers are cumulative.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OverageBand {
    pub allowance: f64,
    pub within_multiplier: f64,
    pub beyond_multiplier: f64,
}

impl Default for OverageBand {
    fn default() -> Self {
        Self { allowance: 0.10, within_multiplier: 2.0, beyond_multiplier: 3.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Builder)]
#[serde(rename_all = "kebab-case", default)]
#[must_use]
pub struct Tariff {
    #[builder(default = Tariff::SUMMER_RATE)]
    pub summer_rate: KilowattRate,

    #[builder(default = Tariff::NON_SUMMER_RATE)]
    pub non_summer_rate: KilowattRate,

    #[builder(default = Tariff::SUMMER_MONTHS)]
    pub summer_months: EnumSet<Month>,

    #[builder(default)]
    pub overage: OverageBand,
}

impl Default for Tariff {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Tariff {
    pub const SUMMER_RATE: KilowattRate = KilowattRate::from_f64(236.2);
    pub const NON_SUMMER_RATE: KilowattRate = KilowattRate::from_f64(173.2);
    pub const SUMMER_MONTHS: EnumSet<Month> =
        enum_set!(Month::June | Month::July | Month::August | Month::September);

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Base fee rate of the month.
    pub fn rate(&self, month: Month) -> KilowattRate {
        if self.summer_months.contains(month) { self.summer_rate } else { self.non_summer_rate }
    }

    pub fn validate(&self) -> Result<(), InvalidTariff> {
        for (name, rate) in
            [("summer rate", self.summer_rate), ("non-summer rate", self.non_summer_rate)]
        {
            let value = rate.into_inner();
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidTariff::NonPositiveRate { name, value });
            }
        }
        let OverageBand { allowance, within_multiplier, beyond_multiplier } = self.overage;
        if !(0.0..=1.0).contains(&allowance) {
            return Err(InvalidTariff::AllowanceOutOfRange(allowance));
        }
        if !(within_multiplier >= 1.0
            && beyond_multiplier >= within_multiplier
            && beyond_multiplier.is_finite())
        {
            return Err(InvalidTariff::Multipliers {
                within: within_multiplier,
                beyond: beyond_multiplier,
            });
        }
        Ok(())
    }
}
