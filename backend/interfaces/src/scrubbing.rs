//! Redaction of captured connector transcripts.

use common_utils::scrub::{scrub_transcript, ScrubRule};
use domain_types::{payment_method_data::Card, router_data::ConnectorAuthType};
use hyperswitch_masking::Secret;

pub trait ConnectorScrubbing {
    /// Patterns matching the sensitive parts of this connector's wire format.
    fn scrub_rules(&self) -> &'static [ScrubRule];

    /// Literal values that must never survive scrubbing.
    fn sensitive_values(
        &self,
        auth_type: &ConnectorAuthType,
        card: Option<&Card>,
    ) -> Vec<Secret<String>>;

    fn scrub(&self, transcript: &str, auth_type: &ConnectorAuthType, card: Option<&Card>) -> String {
        scrub_transcript(
            transcript,
            self.scrub_rules(),
            &self.sensitive_values(auth_type, card),
        )
    }
}
