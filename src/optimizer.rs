//! Exhaustive search for the cheapest whole-kilowatt contracted capacity.
//!
//! The annual fee is a sum of twelve piecewise-linear monthly fees with different rates, and
//! nothing guarantees it is unimodal, so every candidate in the window gets evaluated.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{
    demand::AnnualDemand,
    error::InvalidInput,
    fee::{FeeModel, WasteAndPenalty, check_capacity},
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts},
};

/// Inclusive window of whole-kilowatt capacities to try.
///
/// Never empty, and never wider than [`SearchWindow::MAX_CANDIDATES`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct SearchWindow {
    lower: u32,
    upper: u32,
}

impl SearchWindow {
    /// Lowest candidate relative to the lowest monthly demand.
    pub const LOWER_FACTOR: f64 = 0.8;

    /// Highest candidate relative to the highest monthly demand.
    pub const UPPER_FACTOR: f64 = 1.5;

    /// Widest accepted window. Covers any year whose highest demand stays below 600 MW.
    pub const MAX_CANDIDATES: u32 = 1_000_000;

    pub fn new(demands: &AnnualDemand) -> Result<Self, InvalidInput> {
        let (min_demand, max_demand) = (demands.min(), demands.max());
        let lower = (min_demand * Self::LOWER_FACTOR).floor().max(Kilowatts::from(1));
        // All-zero and near-zero years would otherwise produce an empty window:
        let upper = (max_demand * Self::UPPER_FACTOR).floor().max(lower);
        if upper - lower >= Kilowatts::from_whole(Self::MAX_CANDIDATES) {
            return Err(InvalidInput::WindowTooWide { min_demand, max_demand });
        }
        // Both bounds are now whole numbers well within `u32`:
        Ok(Self { lower: lower.floor_u32(), upper: upper.floor_u32() })
    }

    #[must_use]
    pub const fn lower(self) -> u32 {
        self.lower
    }

    #[must_use]
    pub const fn upper(self) -> u32 {
        self.upper
    }

    #[must_use]
    pub const fn contains(self, capacity: u32) -> bool {
        self.lower <= capacity && capacity <= self.upper
    }

    #[must_use]
    pub const fn range(self) -> RangeInclusive<u32> {
        self.lower..=self.upper
    }

    /// Candidates in increasing order.
    pub fn candidates(self) -> impl Iterator<Item = Kilowatts> {
        self.range().map(Kilowatts::from_whole)
    }
}

/// Annual fee at one candidate capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub capacity: Kilowatts,
    pub fee: Cost,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct OptimizationResult {
    pub optimal_capacity: Kilowatts,
    pub optimal_fee: Cost,
    pub waste: Cost,
    pub penalty: Cost,
    pub window: SearchWindow,

    /// Every candidate of the window in increasing capacity order.
    pub distribution: Vec<Candidate>,
}

/// Current contract compared to the optimum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Assessment {
    pub current_capacity: Kilowatts,
    pub current_fee: Cost,
    pub current: WasteAndPenalty,
    pub optimum: OptimizationResult,

    /// Current fee minus the optimal one.
    pub annual_saving: Cost,

    pub monthly_saving: Cost,
}

pub struct CapacityOptimizer<'a> {
    fee_model: &'a FeeModel,
}

impl<'a> CapacityOptimizer<'a> {
    pub const fn new(fee_model: &'a FeeModel) -> Self {
        Self { fee_model }
    }

    /// Find the cheapest capacity within the [`SearchWindow`].
    ///
    /// Ties go to the smallest capacity.
    pub fn find_optimal(&self, demands: &[Kilowatts]) -> Result<OptimizationResult, InvalidInput> {
        self.optimize(&AnnualDemand::try_from(demands)?)
    }

    /// Annual fee of every candidate within the [`SearchWindow`], in increasing capacity order.
    pub fn fee_distribution(&self, demands: &[Kilowatts]) -> Result<Vec<Candidate>, InvalidInput> {
        let demands = AnnualDemand::try_from(demands)?;
        Ok(self.distribution(&demands, SearchWindow::new(&demands)?))
    }

    /// Compare the current contracted capacity with the optimal one.
    #[instrument(skip_all, fields(current_capacity = %current_capacity))]
    pub fn assess(
        &self,
        current_capacity: Kilowatts,
        demands: &[Kilowatts],
    ) -> Result<Assessment, InvalidInput> {
        check_capacity(current_capacity)?;
        let demands = AnnualDemand::try_from(demands)?;

        let current_fee = self.fee_model.annual_fee_of(current_capacity, &demands);
        let current = self.fee_model.waste_and_penalty_of(current_capacity, &demands);
        let optimum = self.optimize(&demands)?;
        let annual_saving = current_fee - optimum.optimal_fee;
        info!(%current_fee, optimal_fee = %optimum.optimal_fee, %annual_saving, "assessed");

        Ok(Assessment {
            current_capacity,
            current_fee,
            current,
            optimum,
            annual_saving,
            monthly_saving: annual_saving / 12.0,
        })
    }

    #[instrument(skip_all)]
    fn optimize(&self, demands: &AnnualDemand) -> Result<OptimizationResult, InvalidInput> {
        let window = SearchWindow::new(demands)?;
        debug!(lower = window.lower, upper = window.upper, "searching…");

        let distribution = self.distribution(demands, window);
        // `min_by_key` keeps the first of equal minima, that is the smallest capacity:
        let optimum = distribution
            .iter()
            .copied()
            .min_by_key(|candidate| candidate.fee)
            .unwrap_or_else(|| self.evaluate(demands, Kilowatts::from_whole(window.lower)));
        let WasteAndPenalty { waste, penalty } =
            self.fee_model.waste_and_penalty_of(optimum.capacity, demands);
        debug!(capacity = %optimum.capacity, fee = %optimum.fee, "found the optimum");

        Ok(OptimizationResult {
            optimal_capacity: optimum.capacity,
            optimal_fee: optimum.fee,
            waste,
            penalty,
            window,
            distribution,
        })
    }

    fn distribution(&self, demands: &AnnualDemand, window: SearchWindow) -> Vec<Candidate> {
        window.candidates().map(|capacity| self.evaluate(demands, capacity)).collect()
    }

    fn evaluate(&self, demands: &AnnualDemand, capacity: Kilowatts) -> Candidate {
        Candidate { capacity, fee: self.fee_model.annual_fee_of(capacity, demands) }
    }
}
