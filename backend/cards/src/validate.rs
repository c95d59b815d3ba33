use std::{fmt, ops::Deref, str::FromStr};

use common_enums::CardNetwork;
use hyperswitch_masking::{PeekInterface, Strategy, StrongSecret, WithType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Deserialize, Serialize, Error)]
#[error("not a valid credit card number")]
pub struct CCValError;

/// Card number
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CardNumber(StrongSecret<String, CardNumberStrategy>);

impl CardNumber {
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect::<String>()
    }

    pub fn get_card_no(&self) -> String {
        self.0.peek().clone()
    }

    pub fn get_last4(&self) -> String {
        let number = self.0.peek();
        number
            .get(number.len().saturating_sub(4)..)
            .unwrap_or_default()
            .to_string()
    }

    /// Network inferred from the leading digits, first match wins.
    pub fn get_card_network(&self) -> Option<CardNetwork> {
        CARD_NETWORK_REGEX
            .iter()
            .find(|(_, regex)| regex.is_match(self.0.peek()))
            .map(|(network, _)| *network)
    }
}

// Order matters: Maestro BINs overlap the Mastercard 5x range.
static CARD_NETWORK_REGEX: Lazy<Vec<(CardNetwork, Regex)>> = Lazy::new(|| {
    [
        (
            CardNetwork::Maestro,
            r"^(5018|5020|5038|5893|6304|6759|6761|6762|6763)[0-9]{8,15}$",
        ),
        (CardNetwork::Mastercard, r"^(5[1-5][0-9]{14}|2(22[1-9]|2[3-9][0-9]|[3-6][0-9]{2}|7[01][0-9]|720)[0-9]{12})$"),
        (CardNetwork::AmericanExpress, r"^3[47][0-9]{13}$"),
        (CardNetwork::Visa, r"^4[0-9]{12}(?:[0-9]{3})?$"),
        (
            CardNetwork::Discover,
            r"^(6011[0-9]{12}|65[0-9]{14}|64[4-9][0-9]{13}|622(12[6-9]|1[3-9][0-9]|[2-8][0-9]{2}|9[01][0-9]|92[0-5])[0-9]{10})$",
        ),
        (CardNetwork::DinersClub, r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$"),
        (CardNetwork::JCB, r"^(?:2131|1800|35[0-9]{3})[0-9]{11}$"),
        (CardNetwork::UnionPay, r"^62[0-9]{14,17}$"),
    ]
    .into_iter()
    .filter_map(|(network, pattern)| Regex::new(pattern).ok().map(|regex| (network, regex)))
    .collect()
});

impl FromStr for CardNumber {
    type Err = CCValError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match luhn::valid(s) {
            true => {
                let cc_no_whitespace: String = s.split_whitespace().collect();
                Ok(Self(StrongSecret::new(cc_no_whitespace)))
            }
            false => Err(CCValError),
        }
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CCValError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl Deref for CardNumber {
    type Target = StrongSecret<String, CardNumberStrategy>;

    fn deref(&self) -> &StrongSecret<String, CardNumberStrategy> {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Shows the first six digits, stars the rest.
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();

        if val_str.len() < 15 || val_str.len() > 19 {
            return WithType::fmt(val, f);
        }

        match val_str.get(..6) {
            Some(value) => write!(f, "{}{}", value, "*".repeat(val_str.len() - 6)),
            None => WithType::fmt(val, f),
        }
    }
}
