//! Redaction of captured request/response transcripts.

use hyperswitch_masking::{PeekInterface, Secret};
use regex::{NoExpand, Regex};

use crate::consts::FILTERED;

/// A pattern and its replacement, applied with [`Regex::replace_all`].
#[derive(Debug)]
pub struct ScrubRule {
    pattern: Regex,
    replacement: &'static str,
}

impl ScrubRule {
    pub fn new(pattern: Regex, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}

/// Applies every rule in order, then replaces any remaining occurrence of the
/// literal values with [`FILTERED`]. A literal only matches as a whole token,
/// so a CVC of `123` leaves `1234` alone. Literals shorter than three
/// characters are skipped.
pub fn scrub_transcript(transcript: &str, rules: &[ScrubRule], literals: &[Secret<String>]) -> String {
    let scrubbed = rules.iter().fold(transcript.to_string(), |acc, rule| {
        rule.pattern.replace_all(&acc, rule.replacement).into_owned()
    });

    literals
        .iter()
        .map(PeekInterface::peek)
        .filter(|literal| literal.len() >= 3)
        .fold(scrubbed, |acc, literal| redact_literal(acc, literal))
}

fn redact_literal(text: String, literal: &str) -> String {
    // `\b` only holds next to word characters, so it is added per edge.
    let boundary = |edge: Option<char>| match edge {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => "",
    };
    let pattern = format!(
        "{}{}{}",
        boundary(literal.chars().next()),
        regex::escape(literal),
        boundary(literal.chars().last()),
    );
    match Regex::new(&pattern) {
        Ok(regex) => regex.replace_all(&text, NoExpand(FILTERED)).into_owned(),
        Err(_) => text.replace(literal, FILTERED),
    }
}
