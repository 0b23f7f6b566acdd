//! Property-based tests for transaction validation rules.
//!
//! - Accepted transactions always have equal exact decimal totals
//! - Any imbalance is rejected with both totals reported
//! - Negative amounts and single-line transactions never pass

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, Amount};

use super::error::{LedgerError, StructuralError};
use super::types::{ProposedLine, ProposedTransaction};
use super::validation::validate;

/// Strategy to generate a non-negative amount (0.00 to 10,000.00).
fn cents_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a strictly negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn debit(account: i64, amount: Decimal) -> ProposedLine {
    ProposedLine {
        account_id: AccountId::new(account),
        debit: amount,
        credit: Decimal::ZERO,
    }
}

fn credit(account: i64, amount: Decimal) -> ProposedLine {
    ProposedLine {
        account_id: AccountId::new(account),
        debit: Decimal::ZERO,
        credit: amount,
    }
}

fn proposed(lines: Vec<ProposedLine>) -> ProposedTransaction {
    ProposedTransaction {
        date: None,
        description: "Generated".to_string(),
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* set of debits balanced by a single credit of their sum,
    /// validation SHALL accept and report equal totals.
    #[test]
    fn prop_balanced_transaction_accepted(
        debits in prop::collection::vec(cents_amount(), 1..10),
    ) {
        let total: Decimal = debits.iter().copied().sum();
        let mut lines: Vec<_> = debits.iter().enumerate().map(|(i, d)| debit(i as i64 + 1, *d)).collect();
        lines.push(credit(99, total));

        let validated = validate(&proposed(lines)).unwrap();
        prop_assert!(validated.totals().is_balanced);
        prop_assert_eq!(validated.totals().total_debit, validated.totals().total_credit);
        prop_assert_eq!(validated.totals().total_debit, Amount::new(total).unwrap());
    }

    /// *For any* debit/credit pair that differs, validation SHALL reject
    /// with both totals, exactly as submitted.
    #[test]
    fn prop_unbalanced_transaction_rejected(
        debit_amount in cents_amount(),
        credit_amount in cents_amount(),
    ) {
        prop_assume!(debit_amount != credit_amount);
        let result = validate(&proposed(vec![debit(1, debit_amount), credit(2, credit_amount)]));

        match result {
            Err(LedgerError::UnbalancedTransaction { total_debit, total_credit }) => {
                prop_assert_eq!(total_debit, Amount::new(debit_amount).unwrap());
                prop_assert_eq!(total_credit, Amount::new(credit_amount).unwrap());
            }
            other => prop_assert!(false, "expected unbalanced, got {:?}", other),
        }
    }

    /// *For any* transaction containing a negative amount, validation SHALL reject it.
    #[test]
    fn prop_negative_amount_rejected(
        negative in negative_amount(),
        other in cents_amount(),
    ) {
        let result = validate(&proposed(vec![debit(1, negative), credit(2, other)]));
        prop_assert!(
            matches!(result, Err(LedgerError::Structural(StructuralError::NegativeAmount { position: 1 }))),
            "Negative amount should be rejected, got: {:?}",
            result
        );
    }

    /// *For any* single-line transaction, validation SHALL reject it structurally.
    #[test]
    fn prop_single_line_rejected(amount in cents_amount()) {
        let result = validate(&proposed(vec![debit(1, amount)]));
        prop_assert!(
            matches!(result, Err(LedgerError::Structural(StructuralError::InsufficientLines { count: 1 }))),
            "Single line should be rejected, got: {:?}",
            result
        );
    }
}
