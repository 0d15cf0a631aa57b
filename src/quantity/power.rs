use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

pub type Kilowatts = Quantity<1, 0>;

impl Kilowatts {
    pub fn from_whole(kilowatts: u32) -> Self {
        Self::from_f64(f64::from(kilowatts))
    }

    pub fn floor(self) -> Self {
        Self::from_f64(self.into_inner().floor())
    }

    /// Whole kilowatts below the value, saturating at zero and at [`u32::MAX`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn floor_u32(self) -> u32 {
        self.into_inner().floor().max(0.0) as u32
    }
}

impl Display for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kW", self.0)
    }
}

impl Debug for Kilowatts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kW", self.0)
    }
}
