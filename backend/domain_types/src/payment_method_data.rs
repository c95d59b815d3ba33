use cards::{CardExpiration, CardNumber};
use common_enums::CardNetwork;
use common_utils::ext_traits::OptionStringExt;
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{errors::ConnectorError, router_data::Error};

/// A payment card as supplied by the caller.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub card_number: CardNumber,
    pub card_exp_month: Secret<String>,
    pub card_exp_year: Secret<String>,
    pub card_cvc: Secret<String>,
    #[serde(default)]
    pub first_name: Option<Secret<String>>,
    #[serde(default)]
    pub last_name: Option<Secret<String>>,
    /// Explicit brand; detected from the number when absent.
    #[serde(default)]
    pub card_network: Option<CardNetwork>,
}

impl Card {
    pub fn get_expiry(&self) -> Result<CardExpiration, Error> {
        CardExpiration::parse(self.card_exp_month.peek(), self.card_exp_year.peek())
            .change_context(ConnectorError::InvalidDataFormat {
                field_name: "card_exp_month/card_exp_year",
            })
    }

    pub fn get_card_network(&self) -> Option<CardNetwork> {
        self.card_network
            .or_else(|| self.card_number.get_card_network())
    }

    pub fn get_first_name(&self) -> Option<String> {
        self.first_name
            .as_ref()
            .map(|name| name.peek().clone())
            .non_blank()
    }

    pub fn get_last_name(&self) -> Option<String> {
        self.last_name
            .as_ref()
            .map(|name| name.peek().clone())
            .non_blank()
    }

    /// `"first last"`, skipping blank parts.
    pub fn get_cardholder_name(&self) -> Option<Secret<String>> {
        let name = [self.get_first_name(), self.get_last_name()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Some(name).non_blank().map(Secret::new)
    }
}
