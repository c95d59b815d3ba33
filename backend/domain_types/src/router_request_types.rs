//! Optional, caller supplied details that adapters place into vendor payloads.
//!
//! Every field is optional. Adapters copy what is present and omit what is
//! absent; nothing here is validated locally beyond its type.

use std::collections::BTreeMap;

use common_enums::CountryAlpha2;
use common_utils::{
    pii::{Email, IpAddress, PhoneNumberStrategy},
    MinorUnit,
};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentOptions {
    pub order_id: Option<String>,
    pub description: Option<String>,
    pub invoice: Option<String>,
    pub customer_id: Option<String>,
    pub company: Option<String>,
    pub email: Option<Email>,
    pub ip: Option<Secret<String, IpAddress>>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub three_d_secure: Option<ThreeDSecureData>,
    pub airline_data: Option<AirlineData>,
    pub number_of_installments: Option<u32>,
    /// Passed to the vendor verbatim where it supports request de-duplication.
    pub idempotency_key: Option<String>,
    pub basket_products: Vec<BasketProduct>,
    pub fraud_fields: BTreeMap<String, String>,
    /// `Some(false)` lets a single authorize request the capture itself.
    pub requires_approval: Option<bool>,
    pub pre_authorization: bool,
    pub creator: Option<CreatorInfo>,
    pub sub_merchant_name: Option<String>,
    pub is_pool_payment: Option<bool>,
    pub execute_threed: Option<ThreeDRedirect>,
}

impl PaymentOptions {
    pub fn get_billing_country(&self) -> Option<CountryAlpha2> {
        self.billing_address
            .as_ref()
            .and_then(|address| address.country)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub name: Option<Secret<String>>,
    pub company: Option<String>,
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<CountryAlpha2>,
    pub phone: Option<Secret<String, PhoneNumberStrategy>>,
}

/// Externally performed 3-D Secure authentication results.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreeDSecureData {
    pub version: Option<String>,
    pub eci: Option<String>,
    pub cavv: Option<Secret<String>>,
    pub cavv_algorithm: Option<String>,
    pub xid: Option<String>,
    pub ds_transaction_id: Option<String>,
    pub acs_transaction_id: Option<String>,
    pub authentication_response_status: Option<String>,
}

impl ThreeDSecureData {
    /// 3DS 1.x carries an `xid`; 2.x identifies by directory server transaction.
    pub fn is_version_one(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(|version| version.starts_with('1'))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AirlineData {
    pub code: Option<String>,
    pub name: Option<String>,
    /// `YYYYMMDD`
    pub flight_date: Option<String>,
    pub passenger_name: Option<String>,
    pub flight_legs: Vec<FlightLeg>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightLeg {
    pub arrival_airport: Option<String>,
    pub origin_airport: Option<String>,
    pub date: Option<String>,
    pub number: Option<u32>,
    pub carrier_code: Option<String>,
    pub airline_class: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BasketProduct {
    pub product_id: Option<i64>,
    pub product_code: Option<String>,
    pub unit_price: MinorUnit,
    pub quantity: u32,
}

/// Integration metadata some vendors record against the payment.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorInfo {
    pub sdk_identifier: Option<String>,
    pub sdk_creator: Option<String>,
    pub integrator: Option<String>,
    pub creator: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub extension_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThreeDRedirect {
    pub redirect_url: String,
    #[serde(default)]
    pub redirect_type: Option<i32>,
}
