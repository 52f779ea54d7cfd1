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

//! Customer and bank integration tests.

use bank_ledger::{
    AccountId, Bank, CalendarDate, Customer, CustomerHandle, CustomerId, LedgerError, LineSource,
    TransactionKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

// === Helper Functions ===

fn date(day: i32, month: i32, year: i32) -> CalendarDate {
    CalendarDate::new(day, month, year)
}

fn customer(name: &str, id: u32, account: u32) -> Customer {
    Customer::new(name, CustomerId(id), AccountId(account))
}

/// The four-customer roster used by the summary scenarios.
fn take_my_money() -> (Bank, Vec<CustomerHandle>) {
    let mut bank = Bank::new("TakeMyMoney");
    let handles: Vec<CustomerHandle> = [
        customer("Mr. Gardiner", 1, 1001),
        customer("Mr. Bean", 2, 1002),
        customer("Gabe Newell", 3, 1003),
        customer("Winnie the Pooh", 4, 1004),
    ]
    .into_iter()
    .map(|c| bank.add_customer(c))
    .collect();
    (bank, handles)
}

fn last_line(history: &str) -> &str {
    history.lines().last().unwrap_or_default()
}

// === Customer Tests ===

#[test]
fn customer_lifecycle() {
    let cust = customer("Mr. Gardiner", 1, 1000);
    assert_eq!(
        cust.to_string(),
        "Name: Mr. Gardiner\nCustomer ID: 1\nGET_RICH_QUICK ACCOUNT [1000]: Balance $0"
    );

    assert!(cust.perform_transaction(dec!(1000), TransactionKind::Deposit, date(27, 2, 2022)));
    assert!(cust.perform_transaction(dec!(300), TransactionKind::Withdrawal, date(27, 2, 2022)));
    assert!(cust.perform_transaction(dec!(250), TransactionKind::Withdrawal, date(28, 2, 2022)));
    assert!(!cust.perform_transaction(dec!(500), TransactionKind::Withdrawal, date(1, 3, 2022)));
    assert_eq!(
        cust.recent_transactions(),
        "1 27/2/2022 Deposit $1000 Balance: $1000\n\
         2 27/2/2022 Withdrawal $300 Balance: $700\n\
         3 28/2/2022 Withdrawal $250 Balance: $450\n\
         4 1/3/2022 No transaction Balance: $450\n"
    );

    cust.close_account(date(2, 3, 2022));
    assert_eq!(
        cust.to_string(),
        "Name: Mr. Gardiner\nCustomer ID: 1\nGET_RICH_QUICK ACCOUNT [1000]: Balance $0 Account closed"
    );

    cust.open_account(date(3, 3, 2022));
    assert_eq!(
        cust.recent_transactions(),
        "1 27/2/2022 Deposit $1000 Balance: $1000\n\
         2 27/2/2022 Withdrawal $300 Balance: $700\n\
         3 28/2/2022 Withdrawal $250 Balance: $450\n\
         4 1/3/2022 No transaction Balance: $450\n\
         5 2/3/2022 Withdrawal $450 Balance: $0\n\
         6 3/3/2022 Deposit $0 Balance: $0\n"
    );
}

#[test]
fn customer_accessors() {
    let cust = customer("Mr. Bean", 2, 1002);
    assert_eq!(cust.name(), "Mr. Bean");
    assert_eq!(cust.customer_id(), CustomerId(2));
    assert_eq!(cust.account().id(), AccountId(1002));
    assert!(cust.has_open_account());
    assert_eq!(cust.balance(), Decimal::ZERO);
    assert_eq!(
        cust.account_information(),
        "GET_RICH_QUICK ACCOUNT [1002]: Balance $0"
    );
}

// === Bank Tests ===

#[test]
fn bank_summary_scenario() {
    let (mut bank, customers) = take_my_money();

    let closed = bank.close_account(customers[1], date(1, 3, 2022)).unwrap();
    assert_eq!(
        closed.account_information(),
        "GET_RICH_QUICK ACCOUNT [1002]: Balance $0 Account closed"
    );

    let today = date(2, 3, 2022);
    let mut input = LineSource::new(Cursor::new("500.5\n"));
    assert_eq!(bank.deposit_funds(customers[0], &mut input, today), Ok(true));

    // A closed customer leaves the roster with the account.
    assert_eq!(
        bank.deposit_funds(customers[1], &mut input, today),
        Err(LedgerError::CustomerNotFound(customers[1]))
    );

    let mut input = LineSource::new(Cursor::new("600\n"));
    assert_eq!(bank.deposit_funds(customers[3], &mut input, today), Ok(true));

    let mut input = LineSource::new(Cursor::new("200\n"));
    assert_eq!(bank.withdraw_funds(customers[0], &mut input, today), Ok(true));

    assert_eq!(
        bank.display_bank_summary(),
        "\n************************************************************************\n\
         TakeMyMoney has 3 customers\n\
         Total amount in customer accounts $900.5\n\
         ************************************************************************\n"
    );
}

#[test]
fn deposit_to_closed_account_is_refused() {
    let (bank, customers) = take_my_money();
    bank.customer(customers[1])
        .unwrap()
        .close_account(date(1, 3, 2022));

    let mut input = LineSource::new(Cursor::new("500\n"));
    assert_eq!(
        bank.deposit_funds(customers[1], &mut input, date(2, 3, 2022)),
        Err(LedgerError::AccountClosed)
    );
    assert_eq!(LedgerError::AccountClosed.to_string(), "Account is closed!");

    // The refused request did not consume the input line.
    assert_eq!(
        bank.deposit_funds(customers[0], &mut input, date(2, 3, 2022)),
        Ok(true)
    );
    assert_eq!(bank.customer(customers[0]).unwrap().balance(), dec!(500));
}

#[test]
fn withdrawal_with_short_funds_returns_false() {
    let (bank, customers) = take_my_money();
    let mut amount = dec!(10);

    assert_eq!(
        bank.withdraw_funds(customers[2], &mut amount, date(1, 1, 2022)),
        Ok(false)
    );
    let gabe = bank.customer(customers[2]).unwrap();
    assert_eq!(
        gabe.recent_transactions(),
        "1 1/1/2022 No transaction Balance: $0\n"
    );
}

#[test]
fn bad_amount_input_is_reported() {
    let (bank, customers) = take_my_money();
    let mut input = LineSource::new(Cursor::new("five hundred\n"));

    assert_eq!(
        bank.deposit_funds(customers[0], &mut input, date(1, 1, 2022)),
        Err(LedgerError::InvalidAmount("five hundred".to_string()))
    );
    assert_eq!(bank.customer(customers[0]).unwrap().account().transaction_count(), 0);
}

#[test]
fn roster_keeps_insertion_order() {
    let (mut bank, customers) = take_my_money();
    bank.remove_customer(customers[1]).unwrap();

    let names: Vec<_> = bank.customers().map(|(_, c)| c.name().to_string()).collect();
    assert_eq!(names, ["Mr. Gardiner", "Gabe Newell", "Winnie the Pooh"]);
    assert_eq!(bank.len(), 3);
    assert!(!bank.is_empty());
}

#[test]
fn removal_is_by_identity_not_customer_id() {
    let mut bank = Bank::new("TakeMyMoney");
    let first = bank.add_customer(customer("Twin", 7, 1));
    let second = bank.add_customer(customer("Twin", 7, 2));

    let removed = bank.remove_customer(second).unwrap();
    assert_eq!(removed.account().id(), AccountId(2));

    let (handle, remaining) = bank.customers().next().unwrap();
    assert_eq!(handle, first);
    assert_eq!(remaining.account().id(), AccountId(1));

    // A stale handle never matches again.
    assert!(bank.remove_customer(second).is_none());
    assert_eq!(bank.len(), 1);
}

#[test]
fn close_account_with_stale_handle_fails() {
    let (mut bank, customers) = take_my_money();
    bank.close_account(customers[0], date(1, 1, 2022)).unwrap();

    assert_eq!(
        bank.close_account(customers[0], date(2, 1, 2022)).unwrap_err(),
        LedgerError::CustomerNotFound(customers[0])
    );
    assert_eq!(bank.len(), 3);
}

#[test]
fn open_account_returns_account_information() {
    let (bank, customers) = take_my_money();
    let gabe = bank.customer(customers[2]).unwrap();
    gabe.close_account(date(1, 1, 2022));

    assert_eq!(
        bank.open_account(customers[2], date(2, 1, 2022)),
        Ok("GET_RICH_QUICK ACCOUNT [1003]: Balance $0".to_string())
    );
    assert!(gabe.has_open_account());
    assert_eq!(
        last_line(&gabe.recent_transactions()),
        "2 2/1/2022 Deposit $0 Balance: $0"
    );
}

#[test]
fn display_account_information() {
    let (bank, customers) = take_my_money();
    assert_eq!(
        bank.display_account_information(customers[3]),
        Ok("Name: Winnie the Pooh\nCustomer ID: 4\nGET_RICH_QUICK ACCOUNT [1004]: Balance $0".to_string())
    );
}

#[test]
fn summary_counts_all_balances() {
    let (bank, customers) = take_my_money();
    let day = date(1, 1, 2022);
    for (handle, amount) in customers.iter().zip([dec!(1), dec!(2.5), dec!(3), dec!(4)]) {
        bank.customer(*handle)
            .unwrap()
            .perform_transaction(amount, TransactionKind::Deposit, day);
    }
    bank.customer(customers[3]).unwrap().close_account(day);

    let summary = bank.summary();
    assert_eq!(summary.name, "TakeMyMoney");
    assert_eq!(summary.customer_count, 4);
    assert_eq!(summary.total_balance, dec!(6.5));
    assert_eq!(bank.total_balance(), dec!(6.5));
}
