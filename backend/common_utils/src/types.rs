//! Types that can be used in other crates

use std::fmt::Display;

use common_enums::enums;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ParsingError;

/// Amount convertor trait for connector
pub trait AmountConvertor: Send {
    /// Output type for the connector
    type Output;
    /// helps in conversion of connector required amount type
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>>;
}

/// Connector required amount type
#[derive(Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct StringMajorUnitForConnector;

impl AmountConvertor for StringMajorUnitForConnector {
    type Output = StringMajorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        amount.to_major_unit_as_string(currency)
    }
}

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Major denomination rendered with exactly the currency's number of decimals.
    /// Computed on `Decimal` so no float rounding is involved.
    pub fn to_major_unit_as_string(
        self,
        currency: enums::Currency,
    ) -> Result<StringMajorUnit, error_stack::Report<ParsingError>> {
        let scale = u32::from(currency.number_of_digits_after_decimal_point());
        Ok(StringMajorUnit::new(Self::to_major_decimal(self.0, scale).to_string()))
    }

    /// Same as [`Self::to_major_unit_as_string`] with a fixed number of decimals,
    /// for vendors that ignore the currency exponent.
    pub fn to_major_unit_with_scale(self, scale: u32) -> StringMajorUnit {
        StringMajorUnit::new(Self::to_major_decimal(self.0, scale).to_string())
    }

    fn to_major_decimal(amount: i64, scale: u32) -> Decimal {
        Decimal::new(amount, scale)
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MinorUnit {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Connector specific types to send
#[derive(Default, Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    /// forms a new major unit from amount
    fn new(value: String) -> Self {
        Self(value)
    }

    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }
}

impl Display for StringMajorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn minor_to_major_is_exact() {
        let convertor = StringMajorUnitForConnector;
        let cases = [
            (100, enums::Currency::TRY, "1.00"),
            (19900, enums::Currency::TRY, "199.00"),
            (99, enums::Currency::USD, "0.99"),
            (1, enums::Currency::EUR, "0.01"),
            (1234, enums::Currency::JPY, "1234"),
            (1001, enums::Currency::KWD, "1.001"),
            (0, enums::Currency::USD, "0.00"),
        ];
        for (minor, currency, expected) in cases {
            let major = convertor.convert(MinorUnit::new(minor), currency).unwrap();
            assert_eq!(major.get_amount_as_string(), expected);
        }
    }

    #[test]
    fn fixed_scale_ignores_currency_exponent() {
        assert_eq!(MinorUnit::new(5000).to_major_unit_with_scale(2).to_string(), "50.00");
    }
}
