//! Monthly and annual base fee of a contracted capacity.

use serde::Serialize;

use crate::{
    demand::{AnnualDemand, check_demand},
    error::{InvalidInput, InvalidTariff},
    quantity::{cost::Cost, power::Kilowatts, rate::KilowattRate},
    tariff::{Month, Tariff},
};

/// Fee components of a single month.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct MonthlyFee {
    pub month: Month,
    pub demand: Kilowatts,
    pub rate: KilowattRate,

    /// Contracted capacity times the rate, charged regardless of the demand.
    pub base_fee: Cost,

    /// Part of the base fee paid for capacity the demand never reached. Not added to the fee.
    pub waste: Cost,

    /// Surcharge on the excess within the allowance (double rate by default).
    pub overage_within_allowance: Cost,

    /// Surcharge on the excess beyond the allowance (triple rate by default).
    pub overage_beyond_allowance: Cost,
}

impl MonthlyFee {
    pub fn penalty(&self) -> Cost {
        self.overage_within_allowance + self.overage_beyond_allowance
    }

    pub fn fee(&self) -> Cost {
        self.base_fee + self.overage_within_allowance + self.overage_beyond_allowance
    }
}

/// Money paid for unused capacity and surcharges paid for exceeding it, over a year.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[must_use]
pub struct WasteAndPenalty {
    pub waste: Cost,
    pub penalty: Cost,
}

#[derive(Clone, Debug, Default)]
#[must_use]
pub struct FeeModel {
    tariff: Tariff,
}

impl FeeModel {
    /// Fee model of a validated tariff.
    pub fn new(tariff: Tariff) -> Result<Self, InvalidTariff> {
        tariff.validate()?;
        Ok(Self { tariff })
    }

    pub const fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Fee of a single month, `month` being within `1..=12`.
    pub fn monthly_fee(
        &self,
        capacity: Kilowatts,
        demand: Kilowatts,
        month: u32,
    ) -> Result<Cost, InvalidInput> {
        Ok(self.monthly_breakdown(capacity, demand, month)?.fee())
    }

    pub fn monthly_breakdown(
        &self,
        capacity: Kilowatts,
        demand: Kilowatts,
        month: u32,
    ) -> Result<MonthlyFee, InvalidInput> {
        check_capacity(capacity)?;
        let month = Month::try_from(month)?;
        check_demand(month, demand)?;
        Ok(self.breakdown(capacity, demand, month))
    }

    /// Sum of the monthly fees, `demands` starting with January.
    pub fn annual_fee(&self, capacity: Kilowatts, demands: &[Kilowatts]) -> Result<Cost, InvalidInput> {
        check_capacity(capacity)?;
        Ok(self.annual_fee_of(capacity, &AnnualDemand::try_from(demands)?))
    }

    pub fn annual_breakdown(
        &self,
        capacity: Kilowatts,
        demands: &[Kilowatts],
    ) -> Result<Vec<MonthlyFee>, InvalidInput> {
        check_capacity(capacity)?;
        let demands = AnnualDemand::try_from(demands)?;
        Ok(demands.iter().map(|(month, demand)| self.breakdown(capacity, demand, month)).collect())
    }

    pub fn waste_and_penalty(
        &self,
        capacity: Kilowatts,
        demands: &[Kilowatts],
    ) -> Result<WasteAndPenalty, InvalidInput> {
        check_capacity(capacity)?;
        Ok(self.waste_and_penalty_of(capacity, &AnnualDemand::try_from(demands)?))
    }

    pub(crate) fn annual_fee_of(&self, capacity: Kilowatts, demands: &AnnualDemand) -> Cost {
        demands.iter().map(|(month, demand)| self.breakdown(capacity, demand, month).fee()).sum()
    }

    pub(crate) fn waste_and_penalty_of(
        &self,
        capacity: Kilowatts,
        demands: &AnnualDemand,
    ) -> WasteAndPenalty {
        let mut total = WasteAndPenalty::default();
        for (month, demand) in demands.iter() {
            let monthly_fee = self.breakdown(capacity, demand, month);
            total.waste += monthly_fee.waste;
            total.penalty += monthly_fee.penalty();
        }
        total
    }

    fn breakdown(&self, capacity: Kilowatts, demand: Kilowatts, month: Month) -> MonthlyFee {
        let rate = self.tariff.rate(month);
        let base_fee = rate * capacity;
        let excess = demand - capacity;

        if excess <= Kilowatts::ZERO {
            return MonthlyFee {
                month,
                demand,
                rate,
                base_fee,
                waste: rate * (capacity - demand),
                overage_within_allowance: Cost::ZERO,
                overage_beyond_allowance: Cost::ZERO,
            };
        }

        let band = self.tariff.overage;
        let allowance = capacity * band.allowance;
        let within = excess.min(allowance);
        let beyond = excess - within;
        MonthlyFee {
            month,
            demand,
            rate,
            base_fee,
            waste: Cost::ZERO,
            overage_within_allowance: rate * within * band.within_multiplier,
            overage_beyond_allowance: rate * beyond * band.beyond_multiplier,
        }
    }
}

pub(crate) fn check_capacity(capacity: Kilowatts) -> Result<(), InvalidInput> {
    let value = capacity.into_inner();
    if !(value > 0.0) {
        Err(InvalidInput::NonPositiveCapacity(capacity))
    } else if value.is_infinite() {
        Err(InvalidInput::NonFiniteCapacity)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::tariff::OverageBand;

    const NON_SUMMER: f64 = 173.2;
    const SUMMER: f64 = 236.2;

    fn kilowatts(values: [f64; 12]) -> Vec<Kilowatts> {
        values.into_iter().map(Kilowatts::from).collect()
    }

    fn fee(capacity: f64, demand: f64, month: u32) -> f64 {
        FeeModel::default()
            .monthly_fee(Kilowatts::from(capacity), Kilowatts::from(demand), month)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_under_capacity_pays_base_fee() {
        assert_abs_diff_eq!(fee(25.0, 20.0, 1), 25.0 * NON_SUMMER);
        assert_abs_diff_eq!(fee(25.0, 25.0, 7), 25.0 * SUMMER);
        assert_abs_diff_eq!(fee(25.0, 0.0, 12), 25.0 * NON_SUMMER);
    }

    #[test]
    fn test_within_allowance_double_rate() {
        // Allowance is 2.5 kW, excess 2 kW:
        assert_abs_diff_eq!(
            fee(25.0, 27.0, 3),
            25.0 * NON_SUMMER + 2.0 * NON_SUMMER * 2.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_beyond_allowance_triple_rate() {
        // Allowance is 2.5 kW, excess 5 kW:
        assert_abs_diff_eq!(
            fee(25.0, 30.0, 6),
            25.0 * SUMMER + 2.5 * SUMMER * 2.0 + 2.5 * SUMMER * 3.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_continuity_at_allowance() {
        let at_boundary = fee(100.0, 110.0, 2);
        let within_branch = 100.0 * NON_SUMMER + 10.0 * NON_SUMMER * 2.0;
        let beyond_branch = 100.0 * NON_SUMMER + 10.0 * NON_SUMMER * 2.0 + 0.0 * NON_SUMMER * 3.0;
        assert_abs_diff_eq!(at_boundary, within_branch, epsilon = 1e-6);
        assert_abs_diff_eq!(at_boundary, beyond_branch, epsilon = 1e-6);
        assert!(fee(100.0, 110.001, 2) > at_boundary);
    }

    #[test]
    fn test_monthly_fee_invalid_input() {
        let model = FeeModel::default();
        assert_eq!(
            model.monthly_fee(Kilowatts::ZERO, Kilowatts::from(1), 1),
            Err(InvalidInput::NonPositiveCapacity(Kilowatts::ZERO)),
        );
        assert_eq!(
            model.monthly_fee(Kilowatts::from(10), Kilowatts::from(-0.5), 4),
            Err(InvalidInput::NegativeDemand { month: Month::April, demand: Kilowatts::from(-0.5) }),
        );
        assert_eq!(
            model.monthly_fee(Kilowatts::from(10), Kilowatts::from(1), 13),
            Err(InvalidInput::MonthOutOfRange(13)),
        );
        assert_eq!(
            model.monthly_fee(Kilowatts::from(f64::INFINITY), Kilowatts::from(1), 1),
            Err(InvalidInput::NonFiniteCapacity),
        );
        assert!(matches!(
            model.monthly_fee(Kilowatts::from(f64::NAN), Kilowatts::from(1), 1),
            Err(InvalidInput::NonPositiveCapacity(_)),
        ));
    }

    #[test]
    fn test_annual_fee_scenario() {
        let demands = kilowatts([
            20.0, 20.0, 20.0, 20.0, 20.0, 30.0, 30.0, 30.0, 30.0, 20.0, 20.0, 20.0,
        ]);
        let annual_fee =
            FeeModel::default().annual_fee(Kilowatts::from(25), &demands).unwrap().into_inner();
        let summer_month = 25.0 * SUMMER + 2.5 * SUMMER * 2.0 + 2.5 * SUMMER * 3.0;
        assert_abs_diff_eq!(annual_fee, 8.0 * 25.0 * NON_SUMMER + 4.0 * summer_month, epsilon = 1e-6);
    }

    #[test]
    fn test_annual_fee_is_sum_of_monthly_fees() {
        let model = FeeModel::default();
        let demands =
            kilowatts([12.5, 0.0, 33.3, 18.0, 21.0, 40.0, 26.4, 19.9, 27.5, 25.0, 5.0, 30.1]);
        let capacity = Kilowatts::from(25);
        let mut expected = Cost::ZERO;
        for (index, demand) in demands.iter().enumerate() {
            expected += model.monthly_fee(capacity, *demand, index as u32 + 1).unwrap();
        }
        assert_eq!(model.annual_fee(capacity, &demands).unwrap(), expected);
    }

    #[test]
    fn test_annual_fee_wrong_length() {
        let demands = vec![Kilowatts::from(1); 13];
        assert_eq!(
            FeeModel::default().annual_fee(Kilowatts::from(1), &demands),
            Err(InvalidInput::WrongLength(13)),
        );
    }

    #[test]
    fn test_demand_equal_to_capacity() {
        let model = FeeModel::default();
        let demands = vec![Kilowatts::from(40); 12];
        let capacity = Kilowatts::from(40);
        assert_eq!(
            model.waste_and_penalty(capacity, &demands).unwrap(),
            WasteAndPenalty { waste: Cost::ZERO, penalty: Cost::ZERO },
        );
        assert_abs_diff_eq!(
            model.annual_fee(capacity, &demands).unwrap().into_inner(),
            40.0 * (8.0 * NON_SUMMER + 4.0 * SUMMER),
            epsilon = 1e-6,
        );
    }

    #[test]
    fn test_waste_and_penalty() {
        let demands = kilowatts([
            20.0, 20.0, 20.0, 20.0, 20.0, 30.0, 30.0, 30.0, 30.0, 20.0, 20.0, 20.0,
        ]);
        let result = FeeModel::default().waste_and_penalty(Kilowatts::from(25), &demands).unwrap();
        assert_abs_diff_eq!(result.waste.into_inner(), 8.0 * 5.0 * NON_SUMMER, epsilon = 1e-6);
        assert_abs_diff_eq!(
            result.penalty.into_inner(),
            4.0 * (2.5 * SUMMER * 2.0 + 2.5 * SUMMER * 3.0),
            epsilon = 1e-6,
        );
    }

    #[test]
    fn test_breakdown_months_are_exclusive() {
        let demands =
            kilowatts([10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        for monthly_fee in FeeModel::default().annual_breakdown(Kilowatts::from(35), &demands).unwrap() {
            assert!(monthly_fee.waste == Cost::ZERO || monthly_fee.penalty() == Cost::ZERO);
            assert!(monthly_fee.fee() >= monthly_fee.base_fee);
        }
    }

    #[test]
    fn test_custom_tariff() {
        let tariff = Tariff::builder()
            .non_summer_rate(KilowattRate::from(100.0))
            .summer_months(Month::January.into())
            .build();
        let model = FeeModel::new(tariff).unwrap();
        let capacity = Kilowatts::from(10);
        assert_abs_diff_eq!(
            model.monthly_fee(capacity, capacity, 1).unwrap().into_inner(),
            10.0 * SUMMER,
            epsilon = 1e-9,
        );
        assert_abs_diff_eq!(
            model.monthly_fee(capacity, capacity, 7).unwrap().into_inner(),
            1000.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_new_rejects_invalid_tariff() {
        let overage = OverageBand { allowance: -0.1, ..OverageBand::default() };
        assert_eq!(
            FeeModel::new(Tariff::builder().overage(overage).build()).map(|_| ()),
            Err(InvalidTariff::AllowanceOutOfRange(-0.1)),
        );
        assert!(FeeModel::new(Tariff::default()).is_ok());
    }
}
