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

//! Ledger entries.
//!
//! The recorded kind of a [`Transaction`] is decided when it is built:
//! - [`Deposit`] → `Deposit`, balance grows by the amount.
//! - [`Withdrawal`] → `Withdrawal` when funds suffice, otherwise [`NoTransaction`].
//! - anything that cannot be applied → [`NoTransaction`], balance unchanged.
//!
//! [`Deposit`]: TransactionKind::Deposit
//! [`Withdrawal`]: TransactionKind::Withdrawal
//! [`NoTransaction`]: TransactionKind::NoTransaction

use crate::date::CalendarDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    NoTransaction,
}

impl TransactionKind {
    /// Label used in history lines.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::NoTransaction => "No transaction",
        }
    }
}

/// One immutable row of an account ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    amount: Decimal,
    kind: TransactionKind,
    balance_after: Decimal,
    date: CalendarDate,
}

impl Transaction {
    /// Builds the ledger row for `requested` applied on top of `balance_before`.
    ///
    /// Never fails. A request that cannot be applied (overdraft, negative amount,
    /// decimal overflow, or an explicit `NoTransaction`) is recorded as
    /// `NoTransaction` with the balance left untouched. The requested amount is
    /// kept either way.
    pub fn new(
        amount: Decimal,
        requested: TransactionKind,
        date: CalendarDate,
        balance_before: Decimal,
    ) -> Self {
        let applied = if amount < Decimal::ZERO {
            None
        } else {
            match requested {
                TransactionKind::Deposit => balance_before
                    .checked_add(amount)
                    .map(|balance| (TransactionKind::Deposit, balance)),
                TransactionKind::Withdrawal => balance_before
                    .checked_sub(amount)
                    .filter(|balance| *balance >= Decimal::ZERO)
                    .map(|balance| (TransactionKind::Withdrawal, balance)),
                TransactionKind::NoTransaction => None,
            }
        };

        let (kind, balance_after) =
            applied.unwrap_or((TransactionKind::NoTransaction, balance_before));

        Self {
            amount,
            kind,
            balance_after,
            date,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Whether this row moved money.
    pub fn is_applied(&self) -> bool {
        self.kind != TransactionKind::NoTransaction
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransactionKind::Deposit | TransactionKind::Withdrawal => write!(
                f,
                "{} {} ${} Balance: ${}",
                self.date,
                self.kind.description(),
                display_amount(self.amount),
                display_amount(self.balance_after)
            ),
            TransactionKind::NoTransaction => write!(
                f,
                "{} {} Balance: ${}",
                self.date,
                self.kind.description(),
                display_amount(self.balance_after)
            ),
        }
    }
}

/// Strips trailing zeros so whole amounts print as `800` and fractions as `900.5`.
pub(crate) fn display_amount(amount: Decimal) -> Decimal {
    amount.normalize()
}
