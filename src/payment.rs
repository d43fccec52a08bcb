// Payment ledger: wallet balance, charge authorization and refunds
use crate::error::{TravelError, TravelResult};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Wallet,
    // Simulated card/UPI gateway; always accepts
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntryKind {
    Charge,
    Refund,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: LedgerEntryKind,
    pub method: PaymentMethod,
    pub amount: Money,
    pub balance_after: Money,
    pub reference: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub method: PaymentMethod,
    pub amount: Money,
    pub wallet_balance: Money,
}

#[derive(Debug)]
pub struct PaymentLedger {
    payment_id: u32,
    mode: String,
    balance: Money,
    entries: Vec<LedgerEntry>,
}

impl PaymentLedger {
    pub fn new(payment_id: u32, mode: impl Into<String>, opening_balance: Money) -> Self {
        Self {
            payment_id,
            mode: mode.into(),
            balance: opening_balance,
            entries: Vec::new(),
        }
    }

    pub fn payment_id(&self) -> u32 {
        self.payment_id
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn authorize(
        &mut self,
        amount: Money,
        method: PaymentMethod,
    ) -> TravelResult<PaymentReceipt> {
        if !amount.is_positive() {
            return Err(TravelError::InvalidAmount(amount));
        }

        if method == PaymentMethod::Wallet {
            if self.balance < amount {
                warn!(
                    payment_id = self.payment_id,
                    %amount,
                    balance = %self.balance,
                    "Insufficient wallet balance"
                );
                return Err(TravelError::InsufficientFunds {
                    required: amount,
                    available: self.balance,
                });
            }
            self.balance = self.balance.checked_sub(amount).ok_or_else(|| overflow(amount))?;
        }

        let reference = format!("PAY{}", rand::random::<u32>());
        self.record(LedgerEntryKind::Charge, method, amount, reference.clone());
        info!(
            payment_id = self.payment_id,
            ?method,
            %amount,
            balance = %self.balance,
            "Payment successful"
        );

        Ok(PaymentReceipt {
            reference,
            method,
            amount,
            wallet_balance: self.balance,
        })
    }

    // Refunds always land in the wallet, whichever method paid the charge.
    pub fn refund(&mut self, amount: Money) -> TravelResult<Money> {
        if amount.is_negative() {
            return Err(TravelError::InvalidAmount(amount));
        }

        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            warn!(payment_id = self.payment_id, %amount, "Refund would overflow wallet");
            overflow(amount)
        })?;
        let reference = format!("REF{}", rand::random::<u32>());
        self.record(LedgerEntryKind::Refund, PaymentMethod::Wallet, amount, reference);
        info!(
            payment_id = self.payment_id,
            %amount,
            balance = %self.balance,
            "Refund processed"
        );
        Ok(self.balance)
    }

    fn record(
        &mut self,
        kind: LedgerEntryKind,
        method: PaymentMethod,
        amount: Money,
        reference: String,
    ) {
        self.entries.push(LedgerEntry {
            kind,
            method,
            amount,
            balance_after: self.balance,
            reference,
            at: Utc::now(),
        });
    }
}

fn overflow(amount: Money) -> TravelError {
    TravelError::AmountOverflow(format!("wallet balance with {}", amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_case::test_case;

    fn ledger(balance_major: i64) -> PaymentLedger {
        PaymentLedger::new(1, "Online", Money::from_major(balance_major))
    }

    #[test]
    fn test_wallet_authorize_debits() {
        let mut ledger = ledger(20000);
        let receipt = ledger
            .authorize(Money::from_major(10700), PaymentMethod::Wallet)
            .unwrap();
        assert_eq!(receipt.wallet_balance, Money::from_major(9300));
        assert_eq!(ledger.balance(), Money::from_major(9300));
        assert!(receipt.reference.starts_with("PAY"));
    }

    #[test]
    fn test_wallet_authorize_exact_balance() {
        let mut ledger = ledger(700);
        ledger
            .authorize(Money::from_major(700), PaymentMethod::Wallet)
            .unwrap();
        assert_eq!(ledger.balance(), Money::ZERO);
    }

    #[test]
    fn test_wallet_insufficient_funds_leaves_balance() {
        let mut ledger = ledger(5000);
        let err = ledger
            .authorize(Money::from_major(10700), PaymentMethod::Wallet)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_eq!(ledger.balance(), Money::from_major(5000));
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn test_external_payment_never_touches_wallet() {
        let mut ledger = ledger(5000);
        let receipt = ledger
            .authorize(Money::from_major(10700), PaymentMethod::External)
            .unwrap();
        assert_eq!(receipt.method, PaymentMethod::External);
        assert_eq!(ledger.balance(), Money::from_major(5000));
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test_case(Money::ZERO ; "zero")]
    #[test_case(Money::from_major(-5) ; "negative")]
    fn test_authorize_rejects_non_positive(amount: Money) {
        let mut ledger = ledger(100);
        let err = ledger.authorize(amount, PaymentMethod::Wallet).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(ledger.balance(), Money::from_major(100));
    }

    #[test]
    fn test_refund_credits_wallet() {
        let mut ledger = ledger(9300);
        let balance = ledger.refund(Money::from_major(10700)).unwrap();
        assert_eq!(balance, Money::from_major(20000));
        assert_eq!(ledger.entries()[0].kind, LedgerEntryKind::Refund);
    }

    #[test]
    fn test_refund_of_zero_is_accepted() {
        let mut ledger = ledger(10);
        assert_eq!(ledger.refund(Money::ZERO).unwrap(), Money::from_major(10));
        assert!(ledger.refund(Money::from_minor(-1)).is_err());
    }

    #[test]
    fn test_external_payment_refunds_to_wallet() {
        let mut ledger = ledger(0);
        ledger
            .authorize(Money::from_major(700), PaymentMethod::External)
            .unwrap();
        ledger.refund(Money::from_major(700)).unwrap();
        assert_eq!(ledger.balance(), Money::from_major(700));
        assert_eq!(ledger.entries()[1].method, PaymentMethod::Wallet);
    }

    #[test]
    fn test_refund_overflow_leaves_wallet_untouched() {
        let full = Money::from_minor(i64::MAX - 10);
        let mut ledger = PaymentLedger::new(1, "Online", full);
        let err = ledger.refund(Money::from_minor(11)).unwrap_err();
        assert!(matches!(err, TravelError::AmountOverflow(_)));
        assert_eq!(ledger.balance(), full);
        assert!(ledger.entries().is_empty());

        assert_eq!(ledger.refund(Money::from_minor(10)).unwrap(), Money::from_minor(i64::MAX));
    }
}
