//! # Account Module
//!
//! Tài khoản với số dư BigDecimal, debit/credit và back-reference tới Bank.

use crate::bank::{Bank, BankRef};
use crate::error::{AccountError, CoreResult};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to an account, the form a [`Bank`] stores.
pub type SharedAccount = Rc<RefCell<Account>>;

/// A bank account.
///
/// Owner and balance are optional: an account built with
/// [`Account::default`] or cleared through the mutators has neither, and such
/// an account is never equal to any other (see the `PartialEq` impl).
///
/// The bank reference is non-owning. Dropping the bank leaves the account
/// intact, [`Account::bank`] then returns `None`.
///
/// # Examples
/// ```
/// use bigdecimal::BigDecimal;
/// use minibank_core::Account;
/// use std::str::FromStr;
///
/// let mut account = Account::new("Andres", BigDecimal::from_str("1000.12345").unwrap());
/// account.debit(&BigDecimal::from(100)).unwrap();
/// assert_eq!(account.balance().unwrap().to_string(), "900.12345");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    owner: Option<String>,
    balance: Option<BigDecimal>,
    #[serde(skip)]
    bank: Option<BankRef>,
}

impl Account {
    /// Tạo Account mới, chưa thuộc bank nào
    pub fn new(owner: impl Into<String>, balance: BigDecimal) -> Self {
        Self {
            owner: Some(owner.into()),
            balance: Some(balance),
            bank: None,
        }
    }

    /// Wrap into a [`SharedAccount`] so it can be added to a [`Bank`].
    pub fn shared(self) -> SharedAccount {
        Rc::new(RefCell::new(self))
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = Some(owner.into());
    }

    pub fn clear_owner(&mut self) {
        self.owner = None;
    }

    pub fn balance(&self) -> Option<&BigDecimal> {
        self.balance.as_ref()
    }

    pub fn set_balance(&mut self, balance: BigDecimal) {
        self.balance = Some(balance);
    }

    pub fn clear_balance(&mut self) {
        self.balance = None;
    }

    /// The bank that last registered this account, if it is still alive.
    pub fn bank(&self) -> Option<Bank> {
        self.bank.as_ref().and_then(BankRef::upgrade)
    }

    /// Whether the back-reference points at `bank`.
    pub fn belongs_to(&self, bank: &Bank) -> bool {
        self.bank.as_ref().is_some_and(|r| r.points_to(bank))
    }

    /// Only [`Bank::add_account`] sets the back-reference.
    pub(crate) fn set_bank(&mut self, bank: BankRef) {
        self.bank = Some(bank);
    }

    /// Trừ tiền khỏi tài khoản.
    ///
    /// Fails with [`AccountError::InsufficientFunds`] when the result would
    /// be below zero; the balance is left untouched in that case. Debiting
    /// the whole balance is allowed and leaves zero. The sign of `amount` is
    /// not checked, so a negative debit adds to the balance.
    ///
    /// An unset balance counts as zero.
    pub fn debit(&mut self, amount: &BigDecimal) -> CoreResult<()> {
        let zero = BigDecimal::zero();
        let current = self.balance.as_ref().unwrap_or(&zero);
        let new_balance = current - amount;
        if new_balance < zero {
            tracing::warn!(
                owner = ?self.owner,
                %amount,
                balance = %current,
                "Debit refused: insufficient funds"
            );
            return Err(AccountError::InsufficientFunds);
        }
        tracing::debug!(owner = ?self.owner, %amount, balance = %new_balance, "Debit applied");
        self.balance = Some(new_balance);
        Ok(())
    }

    /// Cộng tiền vào tài khoản. No bound check.
    ///
    /// An unset balance counts as zero.
    pub fn credit(&mut self, amount: &BigDecimal) {
        let zero = BigDecimal::zero();
        let new_balance = self.balance.as_ref().unwrap_or(&zero) + amount;
        tracing::debug!(owner = ?self.owner, %amount, balance = %new_balance, "Credit applied");
        self.balance = Some(new_balance);
    }
}

/// Value and scale, so `8900.9997` and `8900.99970` differ.
fn same_decimal(a: &BigDecimal, b: &BigDecimal) -> bool {
    a == b && a.as_bigint_and_exponent().1 == b.as_bigint_and_exponent().1
}

/// Two accounts are equal only when both have an owner and a balance and
/// those match, the balance in value and in scale. A missing field on either
/// side means "not equal", so an account without a balance is not even
/// equal to itself.
impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        match (self.owner.as_deref(), self.balance.as_ref()) {
            (Some(owner), Some(balance)) => {
                other.owner.as_deref() == Some(owner)
                    && other
                        .balance
                        .as_ref()
                        .is_some_and(|theirs| same_decimal(balance, theirs))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner.as_deref() {
            Some(owner) => write!(f, "{}", owner)?,
            None => write!(f, "<unset>")?,
        }
        match &self.balance {
            Some(balance) => write!(f, " ({})", balance),
            None => write!(f, " (<unset>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> BigDecimal {
        text.parse().unwrap()
    }

    fn andres() -> Account {
        Account::new("Andres", dec("1000.12345"))
    }

    #[test]
    fn test_account_creation() {
        let account = andres();

        assert_eq!(account.owner(), Some("Andres"));
        assert_eq!(account.balance(), Some(&dec("1000.12345")));
        assert!(account.bank().is_none());
        assert!(*account.balance().unwrap() > BigDecimal::zero());
    }

    #[test]
    fn test_default_account_is_unset() {
        let account = Account::default();
        assert!(account.owner().is_none());
        assert!(account.balance().is_none());
        assert!(account.bank().is_none());
    }

    #[test]
    fn test_owner_mutators() {
        let mut account = andres();
        account.set_owner("John Doe");
        assert_eq!(account.owner(), Some("John Doe"));

        account.clear_owner();
        assert!(account.owner().is_none());
    }

    #[test]
    fn test_debit() {
        let mut account = andres();
        account.debit(&dec("100")).unwrap();

        assert_eq!(account.balance(), Some(&dec("900.12345")));
        assert_eq!(account.balance().unwrap().to_string(), "900.12345");
        assert_eq!(account.balance().unwrap().with_scale(0), dec("900"));
    }

    #[test]
    fn test_credit() {
        let mut account = andres();
        account.credit(&dec("100"));

        assert_eq!(account.balance().unwrap().to_string(), "1100.12345");
        assert_eq!(account.balance().unwrap().with_scale(0), dec("1100"));
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let mut account = andres();

        let err = account.debit(&dec("1500")).unwrap_err();
        assert_eq!(err, AccountError::InsufficientFunds);
        assert_eq!(err.to_string(), "Insufficient funds");
        // Không thay đổi số dư
        assert_eq!(account.balance(), Some(&dec("1000.12345")));
    }

    #[test]
    fn test_debit_whole_balance_leaves_zero() {
        let mut account = andres();
        account.debit(&dec("1000.12345")).unwrap();
        assert!(account.balance().unwrap().is_zero());
    }

    #[test]
    fn test_negative_debit_acts_as_credit() {
        let mut account = andres();
        account.debit(&dec("-50")).unwrap();
        assert_eq!(account.balance(), Some(&dec("1050.12345")));
    }

    #[test]
    fn test_unset_balance_counts_as_zero() {
        let mut account = Account::default();
        assert!(account.debit(&dec("1")).is_err());
        assert!(account.balance().is_none());

        account.credit(&dec("10"));
        assert_eq!(account.balance(), Some(&dec("10")));
    }

    #[test]
    fn test_small_credit_on_large_balance_is_exact() {
        let large = dec("1000000000000000000000000");
        let mut account = Account::new("A", large.clone());

        account.credit(&dec("0.00001"));
        assert_eq!(
            account.balance(),
            Some(&dec("1000000000000000000000000.00001"))
        );

        account.debit(&dec("0.00001")).unwrap();
        assert_eq!(account.balance(), Some(&large));
    }

    #[test]
    fn test_credit_beyond_96_bit_range() {
        // 2^96 - 1, the largest mantissa a 96-bit decimal can hold
        let mut account = Account::new("A", dec("79228162514264337593543950335"));
        account.credit(&dec("1"));
        assert_eq!(
            account.balance(),
            Some(&dec("79228162514264337593543950336"))
        );
    }

    #[test]
    fn test_equality_same_owner_and_balance() {
        let a = Account::new("John Doe", dec("8900.9997"));
        let b = Account::new("John Doe", dec("8900.9997"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_different_fields() {
        let a = Account::new("John Doe", dec("8900.9997"));
        assert_ne!(a, Account::new("Jane Doe", dec("8900.9997")));
        assert_ne!(a, Account::new("John Doe", dec("8900.9998")));
    }

    #[test]
    fn test_equality_requires_same_scale() {
        let a = Account::new("John Doe", dec("8900.9997"));
        let b = Account::new("John Doe", dec("8900.99970"));
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn test_equality_unset_fields_never_equal() {
        let full = Account::new("John Doe", dec("10"));

        let mut no_balance = full.clone();
        no_balance.clear_balance();
        assert_ne!(no_balance, full);
        assert_ne!(full, no_balance);
        assert_ne!(no_balance, no_balance.clone());

        let mut no_owner = full.clone();
        no_owner.clear_owner();
        assert_ne!(no_owner, full);
        assert_ne!(full, no_owner);

        assert_ne!(Account::default(), Account::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(andres().to_string(), "Andres (1000.12345)");
        assert_eq!(Account::default().to_string(), "<unset> (<unset>)");
    }

    #[test]
    fn test_serialize_balance_as_string() {
        let json = serde_json::to_value(andres()).unwrap();
        assert_eq!(json["owner"], "Andres");
        assert_eq!(json["balance"], "1000.12345");
        assert!(json.get("bank").is_none());
    }

    #[test]
    fn test_deserialize_has_no_bank() {
        let account: Account =
            serde_json::from_str(r#"{"owner":"Andres","balance":"900.12345"}"#).unwrap();
        assert_eq!(account.balance(), Some(&dec("900.12345")));
        assert!(account.bank().is_none());
    }
}
