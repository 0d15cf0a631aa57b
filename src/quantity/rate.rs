use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, power::Kilowatts};

/// New Taiwan dollars per kilowatt of contracted capacity per month.
pub type KilowattRate = Quantity<-1, 1>;

impl Mul<Kilowatts> for KilowattRate {
    type Output = Cost;

    fn mul(self, rhs: Kilowatts) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Mul<KilowattRate> for Kilowatts {
    type Output = Cost;

    fn mul(self, rhs: KilowattRate) -> Self::Output {
        rhs * self
    }
}

impl Display for KilowattRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} NT$/kW", self.0)
    }
}

impl Debug for KilowattRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}NT$/kW", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_mul_kilowatts() {
        let cost = KilowattRate::from(173.2) * Kilowatts::from(25);
        assert_abs_diff_eq!(cost.into_inner(), 4330.0, epsilon = 1e-9);
    }
}
