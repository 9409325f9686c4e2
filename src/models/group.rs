//! Group model
//!
//! A group bundles members and the expenses they share, all denominated in
//! one ledger currency.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::ids::{GroupId, MemberId};
use super::member::Member;
use super::money::Money;

/// A group of people sharing expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    #[serde(default)]
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Ledger currency (ISO 4217 code); empty in a document means the
    /// user's default currency
    #[serde(default)]
    pub currency_code: String,

    #[serde(default)]
    pub members: Vec<Member>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// When the group was created
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create an empty group
    pub fn new(name: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            currency_code: currency_code.into(),
            members: Vec::new(),
            expenses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Add a member and return its id
    pub fn add_member(&mut self, member: Member) -> MemberId {
        let id = member.id;
        self.members.push(member);
        id
    }

    /// Add an expense
    pub fn add_expense(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Get a member by id
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Find a member by name (case-insensitive) or by id string
    pub fn find_member(&self, identifier: &str) -> Option<&Member> {
        let needle = identifier.trim();
        if let Some(member) = self
            .members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(needle))
        {
            return Some(member);
        }

        let id = needle.parse::<MemberId>().ok()?;
        self.member(id)
    }

    /// Display name for a member id, "Unknown" when absent
    pub fn member_name(&self, id: MemberId) -> &str {
        self.member(id).map(|m| m.name.as_str()).unwrap_or("Unknown")
    }

    /// Members ordered oldest first; ties keep their listed order
    pub fn members_by_seniority(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.members.iter().collect();
        members.sort_by_key(|m| m.created_at);
        members
    }

    /// Total of all expense amounts, `None` if it does not fit
    pub fn total_spent(&self) -> Option<Money> {
        Money::checked_sum(self.expenses.iter().map(|e| e.amount))
    }

    /// Date of the most recent expense
    pub fn last_activity(&self) -> Option<NaiveDate> {
        self.expenses.iter().map(|e| e.date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_empty_group() {
        let group = Group::new("Trip", "EUR");
        assert_eq!(group.currency_code, "EUR");
        assert_eq!(group.total_spent(), Some(Money::zero()));
        assert_eq!(group.last_activity(), None);
    }

    #[test]
    fn test_totals_and_activity() {
        let mut group = Group::new("Flat", "USD");
        let alice = group.add_member(Member::new("Alice"));

        let jan = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let feb = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();
        group.add_expense(Expense::new("Rent", Money::from_cents(100_000), alice, feb));
        group.add_expense(Expense::new("Internet", Money::from_cents(4_500), alice, jan));

        assert_eq!(group.total_spent(), Some(Money::from_cents(104_500)));

        group.add_expense(Expense::new("Castle", Money::from_cents(i64::MAX), alice, feb));
        assert_eq!(group.total_spent(), None);
        assert_eq!(group.last_activity(), Some(feb));
    }

    #[test]
    fn test_find_member() {
        let mut group = Group::new("Trip", "USD");
        let alice = group.add_member(Member::new("Alice"));

        assert_eq!(group.find_member("alice").map(|m| m.id), Some(alice));
        assert_eq!(
            group.find_member(&alice.as_uuid().to_string()).map(|m| m.id),
            Some(alice)
        );
        assert!(group.find_member("Zed").is_none());
        assert_eq!(group.member_name(MemberId::new()), "Unknown");
    }

    #[test]
    fn test_members_by_seniority() {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let mut group = Group::new("Trip", "USD");
        group.add_member(Member::with_created_at("Late", base + Duration::days(2)));
        group.add_member(Member::with_created_at("Early", base));
        group.add_member(Member::with_created_at("Tied", base));

        let names: Vec<&str> = group
            .members_by_seniority()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Early", "Tied", "Late"]);
    }

    #[test]
    fn test_minimal_document() {
        let group: Group = serde_json::from_str(r#"{"name":"Trip"}"#).unwrap();
        assert_eq!(group.name, "Trip");
        assert!(group.currency_code.is_empty());
        assert!(group.members.is_empty());
        assert!(group.expenses.is_empty());
    }
}
