//! # Bank Module
//!
//! Bank giữ danh sách tài khoản theo thứ tự thêm vào và thực hiện chuyển
//! khoản giữa hai tài khoản.

use crate::account::{Account, SharedAccount};
use crate::error::CoreResult;
use bigdecimal::{BigDecimal, Zero};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct BankState {
    name: Option<String>,
    accounts: Vec<SharedAccount>,
}

/// A bank: a name plus an ordered list of accounts.
///
/// `Bank` is a cheap-clone handle; clones share the same state, which is
/// what lets accounts point back at it. Mutators therefore take `&self`.
///
/// # Examples
/// ```
/// use minibank_core::{Account, Bank};
/// use bigdecimal::BigDecimal;
///
/// let bank = Bank::with_name("Banco del estado");
/// let john = Account::new("John Doe", BigDecimal::from(2500)).shared();
/// bank.add_account(&john);
///
/// let name = john.borrow().bank().and_then(|b| b.name());
/// assert_eq!(name.as_deref(), Some("Banco del estado"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bank {
    inner: Rc<RefCell<BankState>>,
}

impl Bank {
    /// Bank rỗng, chưa có tên
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let bank = Self::new();
        bank.set_name(name);
        bank
    }

    pub fn name(&self) -> Option<String> {
        self.inner.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.borrow_mut().name = Some(name.into());
    }

    /// Snapshot of the account list, in insertion order.
    pub fn accounts(&self) -> Vec<SharedAccount> {
        self.inner.borrow().accounts.clone()
    }

    /// Replace the whole account list.
    ///
    /// Unlike [`Bank::add_account`] this does not touch the accounts' bank
    /// references.
    pub fn set_accounts(&self, accounts: Vec<SharedAccount>) {
        self.inner.borrow_mut().accounts = accounts;
    }

    /// Append `account` and point its bank reference at this bank.
    ///
    /// Duplicates are kept. An account added to several banks refers to the
    /// last one.
    pub fn add_account(&self, account: &SharedAccount) {
        self.inner.borrow_mut().accounts.push(Rc::clone(account));
        let mut account = account.borrow_mut();
        account.set_bank(self.downgrade());
        tracing::debug!(bank = ?self.name(), owner = ?account.owner(), "Account added");
    }

    /// Debit `origin` then credit `destination` by `amount`.
    ///
    /// If the debit fails the error is returned and `destination` is never
    /// credited. Neither account has to belong to this bank. Passing the
    /// same account twice is allowed.
    pub fn transfer(
        &self,
        origin: &RefCell<Account>,
        destination: &RefCell<Account>,
        amount: &BigDecimal,
    ) -> CoreResult<()> {
        origin.borrow_mut().debit(amount)?;
        destination.borrow_mut().credit(amount);
        tracing::debug!(
            bank = ?self.name(),
            from = ?origin.borrow().owner(),
            to = ?destination.borrow().owner(),
            %amount,
            "Transfer completed"
        );
        Ok(())
    }

    /// First account whose owner is `owner`.
    pub fn find_by_owner(&self, owner: &str) -> Option<SharedAccount> {
        self.inner
            .borrow()
            .accounts
            .iter()
            .find(|account| account.borrow().owner() == Some(owner))
            .cloned()
    }

    pub fn has_owner(&self, owner: &str) -> bool {
        self.find_by_owner(owner).is_some()
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.inner.borrow().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().accounts.is_empty()
    }

    /// Sum of the set balances, one term per entry.
    pub fn total_balance(&self) -> BigDecimal {
        self.inner
            .borrow()
            .accounts
            .iter()
            .filter_map(|account| account.borrow().balance().cloned())
            .fold(BigDecimal::zero(), |total, balance| total + balance)
    }

    /// Whether both handles refer to the same bank.
    pub fn ptr_eq(&self, other: &Bank) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn downgrade(&self) -> BankRef {
        BankRef(Rc::downgrade(&self.inner))
    }
}

/// Non-owning reference from an account to its bank.
#[derive(Clone)]
pub(crate) struct BankRef(Weak<RefCell<BankState>>);

impl BankRef {
    pub(crate) fn upgrade(&self) -> Option<Bank> {
        self.0.upgrade().map(|inner| Bank { inner })
    }

    pub(crate) fn points_to(&self, bank: &Bank) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&bank.inner))
    }
}

// Printing the bank itself would recurse back into its accounts.
impl fmt::Debug for BankRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankRef")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}
