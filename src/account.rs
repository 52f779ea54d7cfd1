// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Account management.
//!
//! An account owns an append-only transaction log. Every request made while the
//! account is open leaves a row in the log, including refused withdrawals, so
//! the log doubles as an audit trail.
//!
//! ```text
//!  Open ──perform_transaction──► Open (row appended)
//!   │
//!   └──close_account──► Closed (full-balance withdrawal appended, balance 0)
//!                          │
//!                          └──set_open(true)──► Open
//! ```
//!
//! # Example
//!
//! ```
//! use bank_ledger::{Account, AccountId, CalendarDate, TransactionKind};
//! use rust_decimal_macros::dec;
//!
//! let account = Account::new(AccountId(1234));
//! let date = CalendarDate::new(23, 4, 2021);
//! assert!(account.perform_transaction(dec!(200), TransactionKind::Deposit, date));
//! assert!(account.perform_transaction(dec!(600), TransactionKind::Deposit, date));
//! assert_eq!(account.to_string(), "GET_RICH_QUICK ACCOUNT [1234]: Balance $800");
//! ```

use crate::base::AccountId;
use crate::date::CalendarDate;
use crate::transaction::{Transaction, TransactionKind, display_amount};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use tracing::debug;

#[derive(Debug)]
struct AccountData {
    account_id: AccountId,
    balance: Decimal,
    is_open: bool,
    transactions: Vec<Transaction>,
}

impl AccountData {
    fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            balance: Decimal::ZERO,
            is_open: true,
            transactions: Vec::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
        debug_assert_eq!(
            self.balance,
            self.transactions
                .last()
                .map_or(Decimal::ZERO, Transaction::balance_after),
            "Invariant violated: balance diverged from the last ledger row"
        );
    }

    /// Builds the row for `requested`, appends it and moves the balance.
    fn record(&mut self, amount: Decimal, requested: TransactionKind, date: CalendarDate) -> bool {
        let transaction = Transaction::new(amount, requested, date, self.balance);
        self.balance = transaction.balance_after();
        self.transactions.push(transaction);
        self.assert_invariants();

        if transaction.is_applied() {
            debug!(account = %self.account_id, kind = ?transaction.kind(), %amount, balance = %self.balance, "transaction applied");
        } else {
            debug!(account = %self.account_id, ?requested, %amount, balance = %self.balance, "transaction recorded as no-op");
        }
        transaction.is_applied()
    }

    fn history(&self, limit: usize) -> String {
        let start = self.transactions.len().saturating_sub(limit);
        let lines = self.transactions[start..]
            .iter()
            .enumerate()
            .map(|(i, transaction)| format!("{} {}\n", i + 1, transaction));

        let mut history = String::new();
        if !self.is_open {
            history.push_str("Account closed\n");
        }
        history.extend(lines);
        history
    }
}

/// Point-in-time view of an account, taken under a single lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AccountSnapshot {
    pub(crate) account_id: AccountId,
    pub(crate) balance: Decimal,
    pub(crate) is_open: bool,
    pub(crate) transaction_count: usize,
}

/// Ledger account.
///
/// State sits behind its own mutex: each operation takes the lock once, so the
/// balance read and the row appended for it are atomic with respect to other
/// writers of the same account.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    /// Label printed in front of every account.
    pub const ACCOUNT_TYPE: &'static str = "GET_RICH_QUICK ACCOUNT";

    /// Number of rows shown by [`recent_transactions`](Self::recent_transactions).
    pub const HISTORY_WINDOW: usize = 10;

    /// Creates an open account with a zero balance and an empty log.
    pub fn new(account_id: AccountId) -> Self {
        Self {
            inner: Mutex::new(AccountData::new(account_id)),
        }
    }

    pub fn id(&self) -> AccountId {
        self.inner.lock().account_id
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().is_open
    }

    /// Flips the open flag without touching the log or the balance.
    pub fn set_open(&self, open: bool) {
        let mut data = self.inner.lock();
        data.is_open = open;
        debug!(account = %data.account_id, open, "account status changed");
    }

    /// Opens the account and records a `Deposit $0` row under one lock.
    ///
    /// The row is appended even if the account was already open.
    pub fn reopen(&self, date: CalendarDate) {
        let mut data = self.inner.lock();
        data.is_open = true;
        data.record(Decimal::ZERO, TransactionKind::Deposit, date);
        debug!(account = %data.account_id, "account reopened");
    }

    /// Applies a deposit or withdrawal.
    ///
    /// Returns `true` when the balance was moved. On an open account a row is
    /// appended in every case, so a refused withdrawal shows up as
    /// `No transaction`. A closed account refuses the request before any row
    /// is built and returns `false`.
    pub fn perform_transaction(
        &self,
        amount: Decimal,
        kind: TransactionKind,
        date: CalendarDate,
    ) -> bool {
        let mut data = self.inner.lock();
        if !data.is_open {
            debug!(account = %data.account_id, ?kind, %amount, "refused: account closed");
            return false;
        }
        data.record(amount, kind, date)
    }

    /// Closes the account and withdraws the whole balance.
    ///
    /// The withdrawal row is appended even when the balance is already zero,
    /// and regardless of whether the account was open.
    pub fn close_account(&self, date: CalendarDate) {
        let mut data = self.inner.lock();
        data.is_open = false;
        let balance = data.balance;
        data.record(balance, TransactionKind::Withdrawal, date);
        debug!(account = %data.account_id, withdrawn = %balance, "account closed");
    }

    /// Up to `limit` most recent rows, oldest first, numbered from 1.
    ///
    /// Each row ends with a newline. A closed account gets an
    /// `Account closed` line in front.
    pub fn max_recent_transactions(&self, limit: usize) -> String {
        self.inner.lock().history(limit)
    }

    /// [`max_recent_transactions`](Self::max_recent_transactions) with the
    /// default window of ten rows.
    pub fn recent_transactions(&self) -> String {
        self.max_recent_transactions(Self::HISTORY_WINDOW)
    }

    /// Copy of the full log in insertion order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.inner.lock().transactions.clone()
    }

    pub fn last_transaction(&self) -> Option<Transaction> {
        self.inner.lock().transactions.last().copied()
    }

    pub fn transaction_count(&self) -> usize {
        self.inner.lock().transactions.len()
    }

    pub(crate) fn snapshot(&self) -> AccountSnapshot {
        let data = self.inner.lock();
        AccountSnapshot {
            account_id: data.account_id,
            balance: data.balance,
            is_open: data.is_open,
            transaction_count: data.transactions.len(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        write!(
            f,
            "{} [{}]: Balance ${}",
            Self::ACCOUNT_TYPE,
            snapshot.account_id,
            display_amount(snapshot.balance)
        )?;
        if !snapshot.is_open {
            f.write_str(" Account closed")?;
        }
        Ok(())
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let snapshot = self.snapshot();
        let mut state = serializer.serialize_struct("Account", 4)?;
        state.serialize_field("account", &snapshot.account_id)?;
        state.serialize_field("balance", &display_amount(snapshot.balance))?;
        state.serialize_field("open", &snapshot.is_open)?;
        state.serialize_field("transactions", &snapshot.transaction_count)?;
        state.end()
    }
}
