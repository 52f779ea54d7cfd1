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

//! Bank customers. Each customer owns exactly one [`Account`].

use crate::account::Account;
use crate::base::{AccountId, CustomerId};
use crate::date::CalendarDate;
use crate::transaction::{TransactionKind, display_amount};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

#[derive(Debug)]
pub struct Customer {
    name: String,
    customer_id: CustomerId,
    account: Account,
}

impl Customer {
    /// Creates a customer together with a fresh open account.
    pub fn new(name: impl Into<String>, customer_id: CustomerId, account_id: AccountId) -> Self {
        Self {
            name: name.into(),
            customer_id,
            account: Account::new(account_id),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    pub fn has_open_account(&self) -> bool {
        self.account.is_open()
    }

    /// Reopens the account and seeds the log with a `Deposit $0` row.
    pub fn open_account(&self, date: CalendarDate) {
        self.account.reopen(date);
    }

    pub fn close_account(&self, date: CalendarDate) {
        self.account.close_account(date);
    }

    pub fn perform_transaction(
        &self,
        amount: Decimal,
        kind: TransactionKind,
        date: CalendarDate,
    ) -> bool {
        self.account.perform_transaction(amount, kind, date)
    }

    pub fn max_recent_transactions(&self, limit: usize) -> String {
        self.account.max_recent_transactions(limit)
    }

    pub fn recent_transactions(&self) -> String {
        self.account.recent_transactions()
    }

    /// The account line, e.g. `GET_RICH_QUICK ACCOUNT [1000]: Balance $0`.
    pub fn account_information(&self) -> String {
        self.account.to_string()
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nCustomer ID: {}\n{}",
            self.name, self.customer_id, self.account
        )
    }
}

impl Serialize for Customer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let snapshot = self.account.snapshot();
        let mut state = serializer.serialize_struct("Customer", 6)?;
        state.serialize_field("customer", &self.customer_id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("account", &snapshot.account_id)?;
        state.serialize_field("balance", &display_amount(snapshot.balance))?;
        state.serialize_field("open", &snapshot.is_open)?;
        state.serialize_field("transactions", &snapshot.transaction_count)?;
        state.end()
    }
}
