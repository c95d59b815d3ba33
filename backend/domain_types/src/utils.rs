use std::fmt::Write;

use rand::Rng;

use crate::errors;

pub type Error = error_stack::Report<errors::ConnectorError>;

pub fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

pub fn generate_random_bytes(length: usize) -> Vec<u8> {
    // returns random bytes of length n
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen()).collect()
}

/// 30 lowercase hex characters.
pub fn generate_reference_id() -> String {
    generate_random_bytes(15)
        .iter()
        .fold(String::with_capacity(30), |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        })
}
