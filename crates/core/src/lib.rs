//! # Minibank Core
//!
//! Domain types cho Minibank:
//! - `Account`: owner + BigDecimal balance, debit/credit with a
//!   non-negative guard
//! - `Bank`: named, ordered list of accounts; registers accounts and transfers
//!   between them
//! - `AccountError`: the single domain error, `InsufficientFunds`
//!
//! ## Example
//!
//! ```
//! use minibank_core::{Account, Bank, BigDecimal};
//!
//! let amount = |text: &str| -> BigDecimal { text.parse().unwrap() };
//!
//! let john = Account::new("John Doe", amount("2500")).shared();
//! let andres = Account::new("Andres", amount("1500.8989")).shared();
//!
//! let bank = Bank::with_name("Banco del estado");
//! bank.add_account(&john);
//! bank.add_account(&andres);
//! bank.transfer(&andres, &john, &amount("500")).unwrap();
//!
//! assert_eq!(andres.borrow().balance().unwrap().to_string(), "1000.8989");
//! assert_eq!(john.borrow().balance().unwrap().to_string(), "3000");
//! ```

pub mod account;
pub mod bank;
pub mod error;

pub use account::{Account, SharedAccount};
pub use bank::Bank;
pub use error::{AccountError, CoreResult};

pub use bigdecimal::BigDecimal;
