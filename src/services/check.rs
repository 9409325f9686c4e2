//! Group consistency check
//!
//! Unlike the balance engine, which stops at the first bad expense, the
//! check walks the whole group and reports every problem it finds.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{ExpenseId, Group, MemberId};

use super::split::{SplitAllocator, SplitMode};

/// One problem found in a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIssue {
    /// Expense the problem belongs to, `None` for member-level problems
    pub expense_id: Option<ExpenseId>,
    /// Expense title or member name
    pub subject: String,
    pub message: String,
}

/// Result of checking a group
#[derive(Debug, Clone, Default)]
pub struct GroupCheck {
    pub issues: Vec<GroupIssue>,
    pub expenses_checked: usize,
    /// Expenses whose splits match an equal split of their amount
    pub equal_splits: usize,
    pub manual_splits: usize,
}

impl GroupCheck {
    /// Check members and every expense of a group
    pub fn run(group: &Group) -> Self {
        let mut check = Self::default();
        let mut member_ids: HashSet<MemberId> = HashSet::with_capacity(group.members.len());

        for member in &group.members {
            if !member_ids.insert(member.id) {
                check.member_issue(&member.name, format!("Member {} is listed more than once", member.id));
            }
            if let Err(e) = member.validate() {
                check.member_issue(&member.name, format!("{} ({})", e, member.id));
            }
        }

        let allocator = SplitAllocator::new();
        for expense in &group.expenses {
            check.expenses_checked += 1;
            let mut push = |message: String| {
                check.issues.push(GroupIssue {
                    expense_id: Some(expense.id),
                    subject: expense.title.clone(),
                    message,
                })
            };

            if let Err(e) = expense.validate() {
                push(e.to_string());
            }
            if !member_ids.contains(&expense.payer_id) {
                push(format!("Payer {} is not a member of the group", expense.payer_id));
            }
            for split in &expense.splits {
                if !member_ids.contains(&split.member_id) {
                    push(format!(
                        "Split member {} is not a member of the group",
                        split.member_id
                    ));
                }
            }

            match allocator.detect_split_mode(expense.amount, &expense.splits) {
                SplitMode::Equal => check.equal_splits += 1,
                SplitMode::Manual => check.manual_splits += 1,
            }
        }

        debug!(
            expenses = check.expenses_checked,
            issues = check.issues.len(),
            "checked group"
        );
        check
    }

    fn member_issue(&mut self, name: &str, message: String) {
        self.issues.push(GroupIssue {
            expense_id: None,
            subject: name.to_string(),
            message,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Member, Money, Split};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_clean_group() {
        let mut group = Group::new("Trip", "USD");
        let a = group.add_member(Member::new("Ana"));
        let b = group.add_member(Member::new("Ben"));
        let splits = SplitAllocator.allocate_equal(Money::from_cents(1001), &[a, b]).unwrap();
        group.add_expense(Expense::new("Dinner", Money::from_cents(1001), a, day()).with_splits(splits));
        group.add_expense(
            Expense::new("Museum", Money::from_cents(1000), b, day()).with_splits(vec![
                Split::new(a, Money::from_cents(300)),
                Split::new(b, Money::from_cents(700)),
            ]),
        );

        let check = GroupCheck::run(&group);
        assert!(check.is_clean(), "{:?}", check.issues);
        assert_eq!(check.expenses_checked, 2);
        assert_eq!(check.equal_splits, 1);
        assert_eq!(check.manual_splits, 1);
    }

    #[test]
    fn test_reports_every_problem() {
        let mut group = Group::new("Trip", "USD");
        let a = group.add_member(Member::new("Ana"));
        group.add_member(Member::new("  "));
        let ghost = MemberId::new();

        group.add_expense(
            Expense::new("Short", Money::from_cents(1000), a, day())
                .with_splits(vec![Split::new(a, Money::from_cents(900))]),
        );
        group.add_expense(
            Expense::new("Ghost taxi", Money::from_cents(500), ghost, day())
                .with_splits(vec![Split::new(ghost, Money::from_cents(500))]),
        );

        let check = GroupCheck::run(&group);
        assert!(!check.is_clean());
        assert_eq!(check.issues.len(), 4);
        assert_eq!(check.issues[0].expense_id, None);
        assert_eq!(check.issues[1].subject, "Short");
        assert!(check.issues[2].message.starts_with("Payer"));
        assert!(check.issues[3].message.starts_with("Split member"));
    }

    #[test]
    fn test_duplicate_member() {
        let mut group = Group::new("Trip", "USD");
        let member = Member::new("Ana");
        group.add_member(member.clone());
        group.add_member(member);

        let check = GroupCheck::run(&group);
        assert_eq!(check.issues.len(), 1);
        assert!(check.issues[0].message.contains("more than once"));
    }
}
