//! Case builder — turns a raw post into a readable risk case.
//!
//! RULE: build() is pure. Every derived field is a function of the
//! record's `id` and `userId`; no clock, no RNG, no counters.
//!
//! NOTE: risk category and status both partition on `id mod 3`, so every
//! AML case is OPEN, every KYC case is REVIEW and every FRAUD case is
//! CLOSED. Consumers rely on the exact formula; do not read it as a
//! business rule.

use crate::{
    error::DeskError,
    name_generator::NameGenerator,
    types::{CaseId, UserId},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk indicators that may be attached to a case, in index order.
pub const SIGNALS: [&str; 5] = [
    "Sanctions match",
    "Adverse media",
    "High-risk jurisdiction",
    "Rapid account turnover",
    "Unusual transaction pattern",
];

/// Reason phrases used in the summary, in index order.
pub const REASONS: [&str; 5] = [
    "unusual transaction patterns inconsistent with prior activity",
    "identity information that does not fully match available records",
    "counterparties linked to high-risk geographies",
    "a sudden spike in volume and velocity over a short period",
    "payment behavior that resembles known fraud typologies",
];

/// A post as returned by the upstream API. Fields other than
/// `id` and `userId` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub user_id: UserId,
    pub id: CaseId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCategory {
    Aml,
    Kyc,
    Fraud,
}

impl RiskCategory {
    pub fn from_id(id: CaseId) -> Self {
        match id % 3 {
            0 => Self::Aml,
            1 => Self::Kyc,
            _ => Self::Fraud,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aml => "AML",
            Self::Kyc => "KYC",
            Self::Fraud => "FRAUD",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    Open,
    Review,
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [Self::Open, Self::Review, Self::Closed];

    pub fn from_id(id: CaseId) -> Self {
        match id % 3 {
            0 => Self::Open,
            1 => Self::Review,
            _ => Self::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Review => "REVIEW",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DeskError::UnknownStatus(s.to_string()))
    }
}

/// Coarse band of a risk score, used for colouring a risk bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,      // < 40
    Elevated, // 40..70
    High,     // >= 70
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::High,
            40..=69 => Self::Elevated,
            _ => Self::Low,
        }
    }
}

/// A synthetic investigation item derived from one raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub subject_name: String,
    pub risk_category: RiskCategory,
    pub status: CaseStatus,
    pub risk_score: u8,
    pub signals: Vec<String>,
    pub summary: String,
}

impl Case {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}

/// Deterministically build a case from a raw record.
pub fn build(raw: &RawRecord) -> Case {
    let id = raw.id;
    let subject_name = NameGenerator::subject_name(id, raw.user_id);
    let risk_category = RiskCategory::from_id(id);
    let status = CaseStatus::from_id(id);
    let risk_score = risk_score_from_id(id);
    let signals = signals_from_id(id);
    let summary = summary_for(id, &subject_name, risk_category, status, risk_score, &signals);

    Case {
        id,
        subject_name,
        risk_category,
        status,
        risk_score,
        signals,
        summary,
    }
}

/// Build a whole batch, preserving input order.
pub fn build_all(records: &[RawRecord]) -> Vec<Case> {
    records.iter().map(build).collect()
}

/// `(id * 13) mod 101`, reduced first so large ids cannot overflow.
pub fn risk_score_from_id(id: CaseId) -> u8 {
    ((id % 101) * 13 % 101) as u8
}

/// `SIGNALS[id mod 5]` then `SIGNALS[(id + 2) mod 5]`, first occurrence kept.
pub fn signals_from_id(id: CaseId) -> Vec<String> {
    let len = SIGNALS.len() as u64;
    let base = id % len;
    let mut signals: Vec<String> = Vec::with_capacity(2);
    for idx in [base, (base + 2) % len] {
        let signal = SIGNALS[idx as usize];
        if !signals.iter().any(|s| s == signal) {
            signals.push(signal.to_string());
        }
    }
    signals
}

fn summary_for(
    id: CaseId,
    subject_name: &str,
    risk_category: RiskCategory,
    status: CaseStatus,
    risk_score: u8,
    signals: &[String],
) -> String {
    let reason = REASONS[(id % REASONS.len() as u64) as usize];
    let mut summary = format!(
        "Investigation note: We flagged {subject_name} for a {risk_category} review \
         because {reason}. Status: {status}. Risk score: {risk_score}/100."
    );
    if !signals.is_empty() {
        summary.push_str(&format!(" Key signals: {}.", signals.join(", ")));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_score_matches_formula_for_large_ids() {
        for id in [0u64, 1, 7, 10, 100, 101, 102, 10_000, u64::MAX] {
            let expected = (id as u128 * 13 % 101) as u8;
            assert_eq!(risk_score_from_id(id), expected, "id {id}");
        }
    }

    #[test]
    fn signals_are_two_distinct_entries() {
        for id in 0..50 {
            let signals = signals_from_id(id);
            assert_eq!(signals.len(), 2);
            assert_ne!(signals[0], signals[1]);
        }
    }

    #[test]
    fn case_status_parses_upper_case_names() {
        assert_eq!("OPEN".parse::<CaseStatus>().unwrap(), CaseStatus::Open);
        assert_eq!("CLOSED".parse::<CaseStatus>().unwrap(), CaseStatus::Closed);
        assert!("open".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn risk_band_thresholds() {
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(39), RiskBand::Low);
        assert_eq!(RiskBand::from_score(40), RiskBand::Elevated);
        assert_eq!(RiskBand::from_score(69), RiskBand::Elevated);
        assert_eq!(RiskBand::from_score(70), RiskBand::High);
        assert_eq!(RiskBand::from_score(100), RiskBand::High);
    }
}
