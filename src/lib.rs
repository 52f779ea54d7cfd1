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

//! # Bank Ledger
//!
//! This library provides an in-memory bank ledger: customers, their accounts,
//! and an audited history of every deposit and withdrawal.
//!
//! ## Core Components
//!
//! - [`Bank`]: Roster of customers, totals and fund transfers
//! - [`Customer`]: Identity bound to exactly one account
//! - [`Account`]: Balance plus an append-only transaction log
//! - [`Transaction`]: One immutable log row
//! - [`CalendarDate`]: Day/month/year stamp
//!
//! Overdrafts never raise errors. A withdrawal that would take the balance
//! below zero is logged as `No transaction` and the call returns `false`.
//!
//! ## Example
//!
//! ```
//! use bank_ledger::{AccountId, Bank, CalendarDate, Customer, CustomerId, TransactionKind};
//! use rust_decimal_macros::dec;
//!
//! let mut bank = Bank::new("TakeMyMoney");
//! let handle = bank.add_customer(Customer::new("Mr. Gardiner", CustomerId(1), AccountId(1000)));
//! let date = CalendarDate::new(27, 2, 2022);
//!
//! let mut amount = dec!(1000);
//! assert_eq!(bank.deposit_funds(handle, &mut amount, date), Ok(true));
//!
//! let customer = bank.customer(handle).unwrap();
//! assert!(!customer.perform_transaction(dec!(5000), TransactionKind::Withdrawal, date));
//! assert_eq!(
//!     customer.recent_transactions(),
//!     "1 27/2/2022 Deposit $1000 Balance: $1000\n2 27/2/2022 No transaction Balance: $1000\n"
//! );
//! ```
//!
//! ## Thread Safety
//!
//! Every account guards its state with its own lock, so a shared `&Bank` can
//! serve deposits and withdrawals from several threads at once.

pub mod account;
mod bank;
mod base;
mod customer;
mod date;
pub mod error;
mod source;
mod transaction;

pub use account::Account;
pub use bank::{Bank, BankSummary};
pub use base::{AccountId, CustomerHandle, CustomerId};
pub use customer::Customer;
pub use date::CalendarDate;
pub use error::LedgerError;
pub use source::{AmountSource, LineSource};
pub use transaction::{Transaction, TransactionKind};
