use common_enums::Currency;
use common_utils::types::{AmountConvertor, MinorUnit};
use domain_types::{errors, router_data::ErrorResponse, router_response_types::Response};
use error_stack::{Report, ResultExt};

type Error = Report<errors::ConnectorError>;

pub use domain_types::utils::missing_field_err;

pub fn convert_amount<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: MinorUnit,
    currency: Currency,
) -> Result<T, Error> {
    amount_convertor
        .convert(amount, currency)
        .change_context(errors::ConnectorError::AmountConversionFailed)
}

/// Joins a base url and a relative path with exactly one `/` between them.
pub fn build_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Keeps at most `max_chars` characters, never splitting a code point.
pub fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Used when an error body is not the JSON the connector documents, e.g. an
/// HTML page from a load balancer. Such replies carry no vendor error code.
pub(crate) fn unreadable_error_response(res: &Response) -> ErrorResponse {
    ErrorResponse {
        reason: Some(String::from_utf8_lossy(&res.response).into_owned()),
        ..ErrorResponse::transport_failure(
            errors::ConnectorError::ResponseDeserializationFailed.to_string(),
            res.status_code,
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use common_utils::types::StringMajorUnitForConnector;

    use super::*;

    #[test]
    fn url_joining_normalizes_slashes() {
        assert_eq!(
            build_url("https://service.refmokaunited.com/", "PaymentDealer/DoVoid"),
            "https://service.refmokaunited.com/PaymentDealer/DoVoid"
        );
        assert_eq!(
            build_url("https://eu.sandbox.api-ingenico.com", "/v1/1226/payments"),
            "https://eu.sandbox.api-ingenico.com/v1/1226/payments"
        );
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("Longbob", 15), "Longbob");
        assert_eq!(truncate("Şükrü Çağlayan", 5), "Şükrü");
    }

    #[test]
    fn converts_minor_units_to_major_string() {
        let amount =
            convert_amount(&StringMajorUnitForConnector, MinorUnit::new(19900), Currency::TRY)
                .unwrap();
        assert_eq!(amount.get_amount_as_string(), "199.00");
    }

    #[test]
    fn html_error_bodies_have_no_vendor_code() {
        let response = Response {
            headers: None,
            response: bytes::Bytes::from_static(b"<html>Bad Gateway</html>"),
            status_code: 502,
        };
        let error = unreadable_error_response(&response);
        assert!(error.code.is_none());
        assert_eq!(error.message, "Failed to deserialize connector response");
        assert_eq!(error.reason.as_deref(), Some("<html>Bad Gateway</html>"));
        assert_eq!(error.status_code, 502);
    }
}
