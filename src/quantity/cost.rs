use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// New Taiwan dollars.
pub type Cost = Quantity<0, 1>;

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} NT$", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}NT$", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Cost::from(1234.5).to_string(), "1234.50 NT$");
        assert_eq!(Cost::from(0.015_1).to_string(), "0.02 NT$");
        assert_eq!(format!("{:?}", Cost::from(-3)), "-3.00NT$");
    }
}
