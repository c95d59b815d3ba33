pub mod validate;

use common_utils::{date_time, errors};
use error_stack::report;
use hyperswitch_masking::{PeekInterface, StrongSecret};
use time::{util::days_in_year_month, Date, Duration, Month, PrimitiveDateTime, Time};

pub use crate::validate::{CCValError, CardNumber, CardNumberStrategy};

pub struct CardSecurityCode(StrongSecret<u16>);

impl CardSecurityCode {
    pub fn new(secret: StrongSecret<u16>) -> errors::CustomResult<Self, errors::ValidationError> {
        let csc = secret.peek();

        if *csc > 99 && *csc < 10000 {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card security code".to_string()
            }))
        }
    }
}

#[derive(Debug)]
pub struct CardExpirationMonth(StrongSecret<u8>);

impl CardExpirationMonth {
    pub fn new(secret: StrongSecret<u8>) -> errors::CustomResult<Self, errors::ValidationError> {
        let month = secret.peek();

        if (1..=12).contains(month) {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string()
            }))
        }
    }

    /// Accepts `"4"`, `"04"` or `" 12 "`.
    pub fn parse(month: &str) -> errors::CustomResult<Self, errors::ValidationError> {
        let value = month.trim().parse::<u8>().map_err(|_| {
            report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string()
            })
        })?;
        Self::new(StrongSecret::new(value))
    }

    pub fn two_digits(&self) -> String {
        format!("{:02}", self.0.peek())
    }
}

#[derive(Debug)]
pub struct CardExpirationYear(StrongSecret<u16>);

impl CardExpirationYear {
    pub fn new(secret: StrongSecret<u16>) -> errors::CustomResult<Self, errors::ValidationError> {
        let year = secret.peek();

        if *year >= 1997 {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration year".to_string()
            }))
        }
    }

    /// Two digit years are read as 20YY.
    pub fn parse(year: &str) -> errors::CustomResult<Self, errors::ValidationError> {
        let trimmed = year.trim();
        let value = trimmed.parse::<u16>().map_err(|_| {
            report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration year".to_string()
            })
        })?;
        let value = if trimmed.len() == 2 { 2000 + value } else { value };
        Self::new(StrongSecret::new(value))
    }

    pub fn four_digits(&self) -> String {
        self.0.peek().to_string()
    }

    pub fn two_digits(&self) -> String {
        format!("{:02}", self.0.peek() % 100)
    }
}

#[derive(Debug)]
pub struct CardExpiration {
    pub month: CardExpirationMonth,
    pub year: CardExpirationYear,
}

impl CardExpiration {
    pub fn new(
        secret_month: StrongSecret<u8>,
        secret_year: StrongSecret<u16>,
    ) -> errors::CustomResult<Self, errors::ValidationError> {
        Ok(Self {
            month: CardExpirationMonth::new(secret_month)?,
            year: CardExpirationYear::new(secret_year)?,
        })
    }

    pub fn parse(month: &str, year: &str) -> errors::CustomResult<Self, errors::ValidationError> {
        Ok(Self {
            month: CardExpirationMonth::parse(month)?,
            year: CardExpirationYear::parse(year)?,
        })
    }

    /// `MMYY`, e.g. `0924`.
    pub fn mmyy(&self) -> String {
        format!("{}{}", self.month.two_digits(), self.year.two_digits())
    }

    pub fn is_expired(&self) -> errors::CustomResult<bool, errors::ValidationError> {
        let invalid = || {
            report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration date".to_string()
            })
        };
        let year = i32::from(*self.year.0.peek());
        let month = Month::try_from(*self.month.0.peek()).map_err(|_| invalid())?;

        // card expiry day is last day of the expiration month
        let expiration_day = days_in_year_month(year, month);
        let expiration_date =
            Date::from_calendar_date(year, month, expiration_day).map_err(|_| invalid())?;

        // max diff b/w utc and other timezones is 14 hours, compensate with a full day
        let expiration_datetime_utc = PrimitiveDateTime::new(expiration_date, Time::MIDNIGHT)
            .saturating_add(Duration::days(1));

        Ok(date_time::now() > expiration_datetime_utc)
    }

    pub fn get_month(&self) -> &CardExpirationMonth {
        &self.month
    }

    pub fn get_year(&self) -> &CardExpirationYear {
        &self.year
    }
}

impl PeekInterface<StrongSecret<u16>> for CardSecurityCode {
    fn peek(&self) -> &StrongSecret<u16> {
        &self.0
    }
}

impl PeekInterface<StrongSecret<u8>> for CardExpirationMonth {
    fn peek(&self) -> &StrongSecret<u8> {
        &self.0
    }
}

impl PeekInterface<StrongSecret<u16>> for CardExpirationYear {
    fn peek(&self) -> &StrongSecret<u16> {
        &self.0
    }
}
