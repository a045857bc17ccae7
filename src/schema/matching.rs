//! Equality matching rules.
//!
//! Matching rules turn a raw value into the canonical form used for
//! comparison and hashing. Rules are named in schema definitions either by
//! name or by OID; both resolve here, case-insensitively.

use crate::dn::Dn;
use crate::error::NormalizationError;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

/// Equality matching rules known to the value layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchingRule {
    CaseIgnore,
    CaseIgnoreIa5,
    CaseExact,
    CaseExactIa5,
    OctetString,
    Integer,
    Boolean,
    ObjectIdentifier,
    NumericString,
    TelephoneNumber,
    DistinguishedName,
    GeneralizedTime,
    Uuid,
}

const RULES: &[(MatchingRule, &str, &str)] = &[
    (MatchingRule::ObjectIdentifier, "objectIdentifierMatch", "2.5.13.0"),
    (MatchingRule::DistinguishedName, "distinguishedNameMatch", "2.5.13.1"),
    (MatchingRule::CaseIgnore, "caseIgnoreMatch", "2.5.13.2"),
    (MatchingRule::CaseExact, "caseExactMatch", "2.5.13.5"),
    (MatchingRule::NumericString, "numericStringMatch", "2.5.13.8"),
    (MatchingRule::Boolean, "booleanMatch", "2.5.13.13"),
    (MatchingRule::Integer, "integerMatch", "2.5.13.14"),
    (MatchingRule::OctetString, "octetStringMatch", "2.5.13.17"),
    (MatchingRule::TelephoneNumber, "telephoneNumberMatch", "2.5.13.20"),
    (MatchingRule::GeneralizedTime, "generalizedTimeMatch", "2.5.13.27"),
    (MatchingRule::CaseExactIa5, "caseExactIA5Match", "1.3.6.1.4.1.1466.109.114.1"),
    (MatchingRule::CaseIgnoreIa5, "caseIgnoreIA5Match", "1.3.6.1.4.1.1466.109.114.2"),
    (MatchingRule::Uuid, "uuidMatch", "1.3.6.1.1.16.2"),
];

impl MatchingRule {
    /// Resolve a rule by name or OID.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        RULES
            .iter()
            .find(|(_, name, oid)| name.eq_ignore_ascii_case(id) || *oid == id)
            .map(|(rule, _, _)| *rule)
    }

    /// The rule's descriptive name.
    pub fn name(&self) -> &'static str {
        RULES
            .iter()
            .find(|(rule, _, _)| rule == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("unknown")
    }

    /// The rule's OID.
    pub fn oid(&self) -> &'static str {
        RULES
            .iter()
            .find(|(rule, _, _)| rule == self)
            .map(|(_, _, oid)| *oid)
            .unwrap_or("")
    }

    /// Normalize a textual value.
    pub fn normalize_text(&self, value: &str) -> Result<String, NormalizationError> {
        match self {
            Self::CaseIgnore | Self::CaseIgnoreIa5 => Ok(collapse_spaces(value).to_lowercase()),
            Self::CaseExact | Self::CaseExactIa5 => Ok(collapse_spaces(value)),
            Self::OctetString => Ok(value.to_string()),
            Self::Integer => self.normalize_integer(value),
            Self::Boolean => match value.trim().to_ascii_uppercase().as_str() {
                upper @ ("TRUE" | "FALSE") => Ok(upper.to_string()),
                _ => Err(self.reject(value, "expected TRUE or FALSE")),
            },
            Self::ObjectIdentifier => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(self.reject(value, "empty object identifier"));
                }
                Ok(trimmed.to_ascii_lowercase())
            }
            Self::NumericString => Ok(value.chars().filter(|c| *c != ' ').collect()),
            Self::TelephoneNumber => Ok(value
                .chars()
                .filter(|c| *c != ' ' && *c != '-')
                .collect::<String>()
                .to_lowercase()),
            Self::DistinguishedName => Dn::new(value)
                .map(|dn| dn.normalized().to_string())
                .map_err(|e| self.reject(value, e.to_string())),
            Self::GeneralizedTime => self.normalize_generalized_time(value),
            Self::Uuid => Uuid::parse_str(value.trim())
                .map(|uuid| uuid.hyphenated().to_string())
                .map_err(|e| self.reject(value, e.to_string())),
        }
    }

    /// Normalize a binary value. Only octet-string comparison applies to bytes.
    pub fn normalize_bytes(&self, value: &[u8]) -> Vec<u8> {
        value.to_vec()
    }

    fn normalize_integer(&self, value: &str) -> Result<String, NormalizationError> {
        let trimmed = value.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(self.reject(value, "not a decimal integer"));
        }
        let digits = digits.trim_start_matches('0');
        Ok(match (negative, digits.is_empty()) {
            (_, true) => "0".to_string(),
            (true, false) => format!("-{}", digits),
            (false, false) => digits.to_string(),
        })
    }

    fn normalize_generalized_time(&self, value: &str) -> Result<String, NormalizationError> {
        let trimmed = value.trim();
        let instant = if let Some(local) = trimmed.strip_suffix('Z') {
            ["%Y%m%d%H%M%S%.f", "%Y%m%d%H%M%S", "%Y%m%d%H%M"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
                .map(|naive| naive.and_utc())
        } else {
            ["%Y%m%d%H%M%S%.f%z", "%Y%m%d%H%M%S%z"]
                .iter()
                .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
                .map(|dt| dt.with_timezone(&Utc))
        };

        instant
            .map(|dt| dt.format("%Y%m%d%H%M%S%.3fZ").to_string())
            .ok_or_else(|| self.reject(value, "not a generalized time"))
    }

    fn reject(&self, value: &str, reason: impl Into<String>) -> NormalizationError {
        NormalizationError::new(self.name(), value, reason)
    }
}

/// Trim and fold every run of whitespace into a single space.
fn collapse_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
