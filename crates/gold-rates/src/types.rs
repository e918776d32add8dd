//! Price types shared between the parser and dashboard renderers.

use serde::{Deserialize, Serialize};

/// Gram weights shown for each purity: the unit price and two presets.
pub const WEIGHT_PRESETS: [u32; 3] = [1, 8, 10];

/// Gold purity grades listed on the rates page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purity {
    /// 22 carat (jewellery grade).
    K22,
    /// 24 carat (pure).
    K24,
}

impl Purity {
    /// Both purities in display order.
    pub const ALL: [Purity; 2] = [Purity::K22, Purity::K24];

    /// Marker text identifying this purity's table on the rates page.
    pub fn table_marker(self) -> &'static str {
        match self {
            Purity::K22 => "22 Carat",
            Purity::K24 => "24 Carat",
        }
    }

    /// Short label used in tabs and headings.
    pub fn label(self) -> &'static str {
        match self {
            Purity::K22 => "22K",
            Purity::K24 => "24K",
        }
    }
}

/// Per-gram unit prices for both purities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldRates {
    /// 22 carat price for one gram.
    pub k22: f64,
    /// 24 carat price for one gram.
    pub k24: f64,
}

impl GoldRates {
    /// Creates a rate pair from unit prices.
    pub fn new(k22: f64, k24: f64) -> Self {
        Self { k22, k24 }
    }

    /// Unit price for the given purity.
    pub fn unit_price(&self, purity: Purity) -> f64 {
        match purity {
            Purity::K22 => self.k22,
            Purity::K24 => self.k24,
        }
    }

    /// Price of `grams` of the given purity.
    pub fn price_for(&self, purity: Purity, grams: u32) -> f64 {
        self.unit_price(purity) * f64::from(grams)
    }

    /// `(grams, price)` pairs for every entry in [`WEIGHT_PRESETS`].
    pub fn presets(&self, purity: Purity) -> [(u32, f64); 3] {
        WEIGHT_PRESETS.map(|g| (g, self.price_for(purity, g)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_multiply_unit_price() {
        let rates = GoldRates::new(8120.0, 8858.0);
        assert_eq!(
            rates.presets(Purity::K22),
            [(1, 8120.0), (8, 64960.0), (10, 81200.0)]
        );
        assert_eq!(rates.price_for(Purity::K24, 10), 88580.0);
    }

    #[test]
    fn test_table_markers() {
        assert_eq!(Purity::K22.table_marker(), "22 Carat");
        assert_eq!(Purity::K24.table_marker(), "24 Carat");
    }
}
