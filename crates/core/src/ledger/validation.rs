//! Business rule validation for proposed transactions.

use rust_decimal::Decimal;
use tally_shared::types::{Amount, AmountError};

use super::error::{LedgerError, StructuralError};
use super::types::{ProposedTransaction, TransactionTotals, ValidatedLine, ValidatedTransaction};

/// Minimum number of lines in a double-entry transaction.
pub const MIN_LINES: usize = 2;

/// Validates a proposed transaction.
///
/// Checks the structure (description, line count, amount sign and scale), then
/// sums debits and credits exactly and requires them to be equal. Pure: account
/// existence is checked later, inside the posting unit of work.
///
/// # Errors
///
/// Returns [`LedgerError::Structural`] for malformed input and
/// [`LedgerError::UnbalancedTransaction`] when the totals differ.
pub fn validate(proposed: &ProposedTransaction) -> Result<ValidatedTransaction, LedgerError> {
    let description = proposed.description.trim();
    if description.is_empty() {
        return Err(StructuralError::EmptyDescription.into());
    }

    if proposed.lines.len() < MIN_LINES {
        return Err(StructuralError::InsufficientLines {
            count: proposed.lines.len(),
        }
        .into());
    }

    let mut lines = Vec::with_capacity(proposed.lines.len());
    for (index, line) in proposed.lines.iter().enumerate() {
        let position = index + 1;
        lines.push(ValidatedLine {
            account_id: line.account_id,
            debit: line_amount(line.debit, position)?,
            credit: line_amount(line.credit, position)?,
        });
    }

    let total_debit: Amount = lines.iter().map(|l| l.debit).sum();
    let total_credit: Amount = lines.iter().map(|l| l.credit).sum();
    let totals = TransactionTotals::new(total_debit, total_credit);

    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedTransaction {
            total_debit,
            total_credit,
        });
    }

    Ok(ValidatedTransaction::new(
        proposed.date,
        description.to_string(),
        lines,
        totals,
    ))
}

fn line_amount(value: Decimal, position: usize) -> Result<Amount, StructuralError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(StructuralError::NegativeAmount { position });
    }
    let amount = Amount::new(value).map_err(|e| match e {
        AmountError::TooPrecise { .. } => StructuralError::ExcessPrecision { position },
        AmountError::OutOfRange { .. } => StructuralError::AmountOutOfRange { position },
    })?;
    // Every amount must be storable as i64 minor units.
    amount
        .to_minor_units()
        .map_err(|_| StructuralError::AmountOutOfRange { position })?;
    Ok(amount)
}
