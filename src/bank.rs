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

//! The bank roster.
//!
//! The [`Bank`] owns its customers outright. Adding a customer hands back a
//! [`CustomerHandle`], and every later operation names the customer by that
//! handle. Two customers that share a [`CustomerId`](crate::CustomerId) are
//! still two entries with two handles.
//!
//! # Thread Safety
//!
//! Roster changes (`add_customer`, `remove_customer`, `close_account`) need
//! `&mut Bank`. Ledger operations only need `&Bank`: each account carries its
//! own lock, so deposits and withdrawals for different customers can run in
//! parallel from a shared bank.

use crate::LedgerError;
use crate::base::CustomerHandle;
use crate::customer::Customer;
use crate::date::CalendarDate;
use crate::source::AmountSource;
use crate::transaction::{TransactionKind, display_amount};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{info, warn};

const SUMMARY_RULE: &str =
    "************************************************************************";

#[derive(Debug)]
pub struct Bank {
    name: String,
    /// Insertion order is preserved.
    customers: Vec<(CustomerHandle, Customer)>,
    next_handle: u64,
}

impl Bank {
    /// Greeting shown when a session with the bank starts.
    pub const WELCOME: &'static str = "Come bank with us - by Mr. Gardiner";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            customers: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn welcome(&self) -> &'static str {
        Self::WELCOME
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Takes ownership of `customer` and returns its roster handle.
    ///
    /// No uniqueness check is made on the customer ID.
    pub fn add_customer(&mut self, customer: Customer) -> CustomerHandle {
        let handle = CustomerHandle(self.next_handle);
        self.next_handle += 1;
        info!(bank = %self.name, %handle, customer = %customer.customer_id(), "customer added");
        self.customers.push((handle, customer));
        handle
    }

    /// Removes the entry for `handle`, returning the customer if it was present.
    pub fn remove_customer(&mut self, handle: CustomerHandle) -> Option<Customer> {
        let position = self.customers.iter().position(|(h, _)| *h == handle)?;
        let (_, customer) = self.customers.remove(position);
        info!(bank = %self.name, %handle, customer = %customer.customer_id(), "customer removed");
        Some(customer)
    }

    pub fn customer(&self, handle: CustomerHandle) -> Option<&Customer> {
        self.customers
            .iter()
            .find_map(|(h, customer)| (*h == handle).then_some(customer))
    }

    /// Customers in insertion order.
    pub fn customers(&self) -> impl Iterator<Item = (CustomerHandle, &Customer)> {
        self.customers.iter().map(|(handle, customer)| (*handle, customer))
    }

    /// Sum of every customer's balance. Closed accounts always hold zero.
    ///
    /// Saturates at [`Decimal::MAX`] when the balances do not fit in one
    /// `Decimal`.
    pub fn total_balance(&self) -> Decimal {
        self.customers
            .iter()
            .map(|(_, customer)| customer.balance())
            .try_fold(Decimal::ZERO, |total, balance| total.checked_add(balance))
            .unwrap_or_else(|| {
                warn!(bank = %self.name, "total balance overflowed, saturating");
                Decimal::MAX
            })
    }

    pub fn summary(&self) -> BankSummary {
        BankSummary {
            name: self.name.clone(),
            customer_count: self.customers.len(),
            total_balance: self.total_balance(),
        }
    }

    /// The framed summary block: customer count and total held.
    pub fn display_bank_summary(&self) -> String {
        self.summary().to_string()
    }

    /// Reopens the customer's account and returns its account line.
    ///
    /// Reopening seeds the log with a `Deposit $0` row.
    pub fn open_account(
        &self,
        handle: CustomerHandle,
        date: CalendarDate,
    ) -> Result<String, LedgerError> {
        let customer = self.get(handle)?;
        customer.open_account(date);
        info!(bank = %self.name, %handle, "account opened");
        Ok(customer.account_information())
    }

    /// Closes the customer's account and drops the customer from the roster.
    ///
    /// The removed customer is returned so its final state can be shown.
    pub fn close_account(
        &mut self,
        handle: CustomerHandle,
        date: CalendarDate,
    ) -> Result<Customer, LedgerError> {
        self.get(handle)?.close_account(date);
        self.remove_customer(handle)
            .ok_or(LedgerError::CustomerNotFound(handle))
    }

    pub fn display_account_information(
        &self,
        handle: CustomerHandle,
    ) -> Result<String, LedgerError> {
        Ok(self.get(handle)?.to_string())
    }

    /// Deposits an amount drawn from `source`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CustomerNotFound`] - `handle` is not on the roster.
    /// - [`LedgerError::AccountClosed`] - the account is closed; `source` is not consulted.
    /// - Any error `source` returns.
    pub fn deposit_funds<S>(
        &self,
        handle: CustomerHandle,
        source: &mut S,
        date: CalendarDate,
    ) -> Result<bool, LedgerError>
    where
        S: AmountSource + ?Sized,
    {
        self.fund_transfer(
            handle,
            source,
            TransactionKind::Deposit,
            "Enter the amount to deposit:",
            date,
        )
    }

    /// Withdraws an amount drawn from `source`.
    ///
    /// Returns `Ok(false)` when funds are short; the refused request is still
    /// recorded in the account log.
    ///
    /// # Errors
    ///
    /// Same as [`deposit_funds`](Self::deposit_funds).
    pub fn withdraw_funds<S>(
        &self,
        handle: CustomerHandle,
        source: &mut S,
        date: CalendarDate,
    ) -> Result<bool, LedgerError>
    where
        S: AmountSource + ?Sized,
    {
        self.fund_transfer(
            handle,
            source,
            TransactionKind::Withdrawal,
            "Enter the amount to withdraw:",
            date,
        )
    }

    fn fund_transfer<S>(
        &self,
        handle: CustomerHandle,
        source: &mut S,
        kind: TransactionKind,
        prompt: &str,
        date: CalendarDate,
    ) -> Result<bool, LedgerError>
    where
        S: AmountSource + ?Sized,
    {
        let customer = self.get(handle)?;
        if !customer.has_open_account() {
            warn!(bank = %self.name, %handle, ?kind, "refused: account is closed");
            return Err(LedgerError::AccountClosed);
        }

        let amount = source.next_amount(prompt)?;
        Ok(customer.perform_transaction(amount, kind, date))
    }

    fn get(&self, handle: CustomerHandle) -> Result<&Customer, LedgerError> {
        self.customer(handle)
            .ok_or(LedgerError::CustomerNotFound(handle))
    }
}

/// Customer count and total funds of a bank at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankSummary {
    pub name: String,
    pub customer_count: usize,
    pub total_balance: Decimal,
}

impl fmt::Display for BankSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\n{SUMMARY_RULE}\n{} has {} customers\nTotal amount in customer accounts ${}\n{SUMMARY_RULE}\n",
            self.name,
            self.customer_count,
            display_amount(self.total_balance)
        )
    }
}
