//! Balance over a list of transactions. Income adds, expense subtracts; no currency conversion.

use crate::domain::Transaction;

pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Assumes every transaction shares one currency.
    pub fn calculate(transactions: &[Transaction]) -> f64 {
        transactions.iter().fold(0.0, |balance, tx| {
            if tx.is_income() {
                balance + tx.amount()
            } else {
                balance - tx.amount()
            }
        })
    }
}
