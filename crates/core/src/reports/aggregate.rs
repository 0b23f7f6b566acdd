//! Grouping of posted lines shared by every report.

use std::collections::BTreeMap;

use tally_shared::types::{AccountId, Amount};

use super::types::{AccountSummary, TypeTotals};
use crate::ledger::PostedLine;

/// Groups lines per account, ordered by code then id.
///
/// Accounts without lines do not appear.
#[must_use]
pub fn by_account(lines: &[PostedLine]) -> Vec<AccountSummary> {
    let mut grouped: BTreeMap<(&str, AccountId), AccountSummary> = BTreeMap::new();

    for line in lines {
        let summary = grouped
            .entry((line.code.as_str(), line.account_id))
            .or_insert_with(|| AccountSummary {
                account_id: line.account_id,
                code: line.code.clone(),
                name: line.name.clone(),
                account_type: line.account_type,
                total_debit: Amount::ZERO,
                total_credit: Amount::ZERO,
                balance: Amount::ZERO,
            });
        summary.total_debit += line.debit;
        summary.total_credit += line.credit;
    }

    grouped
        .into_values()
        .map(|mut summary| {
            summary.balance = summary.total_debit - summary.total_credit;
            summary
        })
        .collect()
}

/// Groups lines per account type.
#[must_use]
pub fn by_type(lines: &[PostedLine]) -> TypeTotals {
    let mut totals = TypeTotals::default();
    for line in lines {
        totals.record(line.account_type, line.debit, line.credit);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::AccountType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn line(id: i64, code: &str, account_type: AccountType, debit: &str, credit: &str) -> PostedLine {
        PostedLine {
            account_id: AccountId::new(id),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            debit: debit.parse().unwrap(),
            credit: credit.parse().unwrap(),
        }
    }

    #[test]
    fn test_by_account_orders_by_code_and_sums() {
        let lines = vec![
            line(2, "4000", AccountType::Revenue, "0", "100"),
            line(1, "1000", AccountType::Asset, "100", "0"),
            line(1, "1000", AccountType::Asset, "0", "30"),
            line(3, "5000", AccountType::Expense, "30", "0"),
        ];

        let rows = by_account(&lines);

        let codes: Vec<_> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["1000", "4000", "5000"]);
        assert_eq!(rows[0].total_debit, Amount::new(dec!(100)).unwrap());
        assert_eq!(rows[0].total_credit, Amount::new(dec!(30)).unwrap());
        assert_eq!(rows[0].balance, Amount::new(dec!(70)).unwrap());
        assert_eq!(rows[1].balance, Amount::new(dec!(-100)).unwrap());
    }

    #[test]
    fn test_by_account_empty() {
        assert!(by_account(&[]).is_empty());
    }

    #[test]
    fn test_by_type_normal_balances() {
        let lines = vec![
            line(1, "1000", AccountType::Asset, "250", "50"),
            line(2, "4000", AccountType::Revenue, "10", "200"),
        ];

        let totals = by_type(&lines);

        assert_eq!(totals.normal_balance(AccountType::Asset), Amount::new(dec!(200)).unwrap());
        assert_eq!(totals.normal_balance(AccountType::Revenue), Amount::new(dec!(190)).unwrap());
        assert_eq!(totals.normal_balance(AccountType::Liability), Amount::ZERO);
    }
}
