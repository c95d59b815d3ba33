//! Common utilities for the gateway adapters

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod pii;
pub mod request;
pub mod scrub;
pub mod types;

pub use errors::{CustomResult, ParsingError, ValidationError};
pub use pii::{Email, SecretSerdeValue};
pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::{AmountConvertor, MinorUnit, StringMajorUnit, StringMajorUnitForConnector};

pub mod date_time {
    use time::{format_description::BorrowedFormatItem, OffsetDateTime, PrimitiveDateTime};

    /// Create a new [`PrimitiveDateTime`] with the current date and time in UTC.
    pub fn now() -> PrimitiveDateTime {
        let utc_date_time = OffsetDateTime::now_utc();
        PrimitiveDateTime::new(utc_date_time.date(), utc_date_time.time())
    }

    /// RFC 1123 date with a literal `GMT` suffix, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`.
    pub const HTTP_DATE: &[BorrowedFormatItem<'static>] = time::macros::format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );

    /// Current UTC time formatted as an HTTP `Date` header value.
    pub fn http_date_now() -> Result<String, time::error::Format> {
        OffsetDateTime::now_utc().format(HTTP_DATE)
    }

}
