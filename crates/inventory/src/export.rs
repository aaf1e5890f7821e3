use core::str::FromStr;

use candystock_core::DomainError;

/// Tables that can be exported as CSV.
///
/// `Inventory` and `DistributorPrices` export denormalized projections with
/// names instead of raw foreign keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExportTable {
    Items,
    Inventory,
    Distributors,
    DistributorPrices,
}

impl ExportTable {
    pub const ALL: [ExportTable; 4] = [
        ExportTable::Items,
        ExportTable::Inventory,
        ExportTable::Distributors,
        ExportTable::DistributorPrices,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportTable::Items => "items",
            ExportTable::Inventory => "inventory",
            ExportTable::Distributors => "distributors",
            ExportTable::DistributorPrices => "distributor_prices",
        }
    }
}

impl FromStr for ExportTable {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportTable::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation("invalid_table"))
    }
}

impl core::fmt::Display for ExportTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
