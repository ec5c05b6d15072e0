//! Command handlers: build in-memory accounts, run the operation, report.

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use minibank_core::{Account, Bank, CoreResult};
use serde::Serialize;

use crate::OutputFormat;

/// What a command did, ready to print.
#[derive(Debug, Serialize)]
pub struct OperationReport {
    pub operation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    pub amount: BigDecimal,
    pub accounts: Vec<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report plus the domain result, kept apart so the caller can print the
/// report and still fail with the original error.
#[derive(Debug)]
pub struct Outcome {
    pub report: OperationReport,
    pub result: CoreResult<()>,
}

impl Outcome {
    fn new(
        operation: &'static str,
        bank: Option<String>,
        amount: BigDecimal,
        accounts: Vec<Account>,
        result: CoreResult<()>,
    ) -> Self {
        let report = OperationReport {
            operation,
            bank,
            amount,
            accounts,
            error: result.as_ref().err().map(ToString::to_string),
        };
        Self { report, result }
    }

    /// Turn the domain result into an anyhow error at the binary boundary.
    pub fn into_result(self) -> Result<()> {
        let operation = self.report.operation;
        self.result.with_context(|| format!("{} failed", operation))
    }
}

/// Debit `amount` from a fresh account
pub fn debit(owner: &str, balance: BigDecimal, amount: BigDecimal) -> Outcome {
    let mut account = Account::new(owner, balance);
    let result = account.debit(&amount);
    Outcome::new("debit", None, amount, vec![account], result)
}

/// Credit `amount` to a fresh account
pub fn credit(owner: &str, balance: BigDecimal, amount: BigDecimal) -> Outcome {
    let mut account = Account::new(owner, balance);
    account.credit(&amount);
    Outcome::new("credit", None, amount, vec![account], Ok(()))
}

/// Register both accounts with a bank named `bank_name`, then transfer.
pub fn transfer(
    bank_name: &str,
    from: (&str, BigDecimal),
    to: (&str, BigDecimal),
    amount: BigDecimal,
) -> Outcome {
    let bank = Bank::with_name(bank_name);
    let origin = Account::new(from.0, from.1).shared();
    let destination = Account::new(to.0, to.1).shared();
    bank.add_account(&origin);
    bank.add_account(&destination);

    let result = bank.transfer(&origin, &destination, &amount);

    let accounts = bank
        .accounts()
        .iter()
        .map(|account| account.borrow().clone())
        .collect();
    Outcome::new("transfer", bank.name(), amount, accounts, result)
}

/// Render a report as text or JSON
pub fn render(report: &OperationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
        OutputFormat::Text => Ok(render_text(report)),
    }
}

fn render_text(report: &OperationReport) -> String {
    let mut out = String::new();
    match &report.error {
        None => out.push_str(&format!("✅ {} {}", report.operation, report.amount)),
        Some(error) => out.push_str(&format!(
            "❌ {} {} refused: {}",
            report.operation, report.amount, error
        )),
    }
    if let Some(bank) = &report.bank {
        out.push_str(&format!(" at {}", bank));
    }
    out.push('\n');
    for account in &report.accounts {
        out.push_str(&format!("  💰 {}\n", account));
    }
    out
}
