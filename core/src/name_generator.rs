//! Deterministic subject name generation using curated name lists.
//!
//! A case subject is either a person or a company. The choice and the
//! names themselves are pure functions of (case id, user id): the same
//! record always names the same subject.

use crate::types::{CaseId, UserId};

/// Deterministic name generator using curated name lists
pub struct NameGenerator;

impl NameGenerator {
    /// Subject name for a record. Even user ids are companies,
    /// odd user ids are people.
    pub fn subject_name(id: CaseId, user_id: UserId) -> String {
        if user_id % 2 == 0 {
            Self::company_name(id, user_id).to_string()
        } else {
            Self::full_name(id, user_id)
        }
    }

    /// Generate a full name (first + last) deterministically
    pub fn full_name(id: CaseId, user_id: UserId) -> String {
        format!(
            "{} {}",
            Self::first_name(id, user_id),
            Self::last_name(id)
        )
    }

    /// First name at `(user_id + id) mod N`
    pub fn first_name(id: CaseId, user_id: UserId) -> &'static str {
        let names = Self::first_names();
        names[index_of_sum(id, user_id, names.len())]
    }

    /// Last name at `(id * 7) mod M`
    pub fn last_name(id: CaseId) -> &'static str {
        let names = Self::last_names();
        let len = names.len() as u64;
        names[((id % len) * 7 % len) as usize]
    }

    /// Company name at `(id + user_id) mod |companies|`
    pub fn company_name(id: CaseId, user_id: UserId) -> &'static str {
        let names = Self::companies();
        names[index_of_sum(id, user_id, names.len())]
    }

    fn first_names() -> &'static [&'static str] {
        &["Alex", "Jordan", "Sam", "Taylor", "Morgan"]
    }

    fn last_names() -> &'static [&'static str] {
        &["Ng", "Patel", "Garcia", "Kim", "Johnson"]
    }

    fn companies() -> &'static [&'static str] {
        &["Northstar Trading", "Blue Harbor LLC", "Orchid Ventures"]
    }
}

/// `(id + user_id) mod len`, overflow-free and never negative.
fn index_of_sum(id: CaseId, user_id: UserId, len: usize) -> usize {
    let len = len as i64;
    let id_part = (id % len as u64) as i64;
    (id_part + user_id.rem_euclid(len)).rem_euclid(len) as usize
}
