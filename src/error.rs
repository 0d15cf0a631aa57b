use thiserror::Error;

use crate::{quantity::power::Kilowatts, tariff::Month};

/// Rejected input of a fee or optimizer operation.
///
/// Validation happens eagerly on entry, so an error means nothing has been computed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum InvalidInput {
    #[error("contracted capacity must be positive, got {0}")]
    NonPositiveCapacity(Kilowatts),

    #[error("contracted capacity must be finite")]
    NonFiniteCapacity,

    #[error("demand in {month} must not be negative, got {demand}")]
    NegativeDemand { month: Month, demand: Kilowatts },

    #[error("demand in {month} must be finite")]
    NonFiniteDemand { month: Month },

    #[error("month must be within 1..=12, got {0}")]
    MonthOutOfRange(u32),

    #[error("expected demands for exactly 12 months, got {0}")]
    WrongLength(usize),

    #[error(
        "demands between {min_demand} and {max_demand} need more than {max} candidate capacities",
        max = crate::optimizer::SearchWindow::MAX_CANDIDATES,
    )]
    WindowTooWide { min_demand: Kilowatts, max_demand: Kilowatts },
}

/// Rejected tariff configuration.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum InvalidTariff {
    #[error("{name} must be positive, got {value}")]
    NonPositiveRate { name: &'static str, value: f64 },

    #[error("overage allowance must be within 0..=1, got {0}")]
    AllowanceOutOfRange(f64),

    #[error("overage multipliers must be at least 1 and must not decrease, got {within} and {beyond}")]
    Multipliers { within: f64, beyond: f64 },
}
