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

use bank_ledger::{AccountId, Bank, CalendarDate, Customer, CustomerHandle, CustomerId};
use clap::Parser;
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Bank Ledger - Replay a CSV script of bank operations
///
/// Reads operations from a CSV file and outputs the account table to stdout.
/// Supports adding customers, opening, depositing, withdrawing, closing and
/// removing.
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Replays bank operations from a CSV script", long_about = None)]
struct Args {
    /// Path to CSV file with operations
    ///
    /// Expected format: op,customer,name,account,amount,date
    /// Example: cargo run -- operations.csv > accounts.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Name printed in the bank summary
    #[arg(long, default_value = "TakeMyMoney")]
    bank_name: String,

    /// Also print each customer's recent transactions and the bank summary
    #[arg(long)]
    history: bool,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    set_up_logging(args.verbose);

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            error!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let bank = match process_operations(BufReader::new(file), &args.bank_name) {
        Ok(bank) => bank,
        Err(e) => {
            error!("Error processing operations: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_accounts(&bank, io::stdout()) {
        error!("Error writing output: {}", e);
        process::exit(1);
    }

    if args.history {
        if let Err(e) = write_history(&bank, io::stdout().lock()) {
            error!("Error writing history: {}", e);
            process::exit(1);
        }
    }
}

fn set_up_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,bank_ledger={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(true)
        .init();
}

/// Raw CSV record matching the input format.
///
/// Fields: `op, customer, name, account, amount, date`
#[derive(Debug, Deserialize)]
struct CsvRecord {
    op: String,
    customer: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    account: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    amount: Option<Decimal>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Operation {
    Add {
        customer_id: CustomerId,
        name: String,
        account_id: AccountId,
    },
    Open(CustomerId),
    Deposit(CustomerId, Decimal),
    Withdraw(CustomerId, Decimal),
    Close(CustomerId),
    Remove(CustomerId),
}

impl CsvRecord {
    /// Converts CSV record to an operation and the date it is stamped with.
    ///
    /// Returns `None` for unknown operations, missing required fields or an
    /// unparseable date. Rows without a date are stamped with today's date.
    fn into_operation(self) -> Option<(Operation, CalendarDate)> {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => CalendarDate::today(),
            Some(text) => text.parse().ok()?,
        };
        let customer_id = CustomerId(self.customer);

        let operation = match self.op.to_lowercase().as_str() {
            "add" => Operation::Add {
                customer_id,
                name: self.name?,
                account_id: AccountId(self.account?),
            },
            "open" => Operation::Open(customer_id),
            "deposit" => Operation::Deposit(customer_id, self.amount?),
            "withdraw" | "withdrawal" => Operation::Withdraw(customer_id, self.amount?),
            "close" => Operation::Close(customer_id),
            "remove" => Operation::Remove(customer_id),
            _ => return None,
        };

        Some((operation, date))
    }
}

/// Replay state: the bank plus the handle issued for each customer number.
///
/// When a script adds the same customer number twice, later rows address the
/// most recently added entry.
struct Replay {
    bank: Bank,
    handles: HashMap<CustomerId, CustomerHandle>,
}

impl Replay {
    fn new(bank_name: &str) -> Self {
        let bank = Bank::new(bank_name);
        info!(bank = %bank.name(), "{}", bank.welcome());
        Self {
            bank,
            handles: HashMap::new(),
        }
    }

    fn handle(&self, customer_id: CustomerId) -> Option<CustomerHandle> {
        let handle = self.handles.get(&customer_id).copied();
        if handle.is_none() {
            warn!(customer = %customer_id, "Skipping operation for unknown customer");
        }
        handle
    }

    fn apply(&mut self, operation: Operation, date: CalendarDate) {
        match operation {
            Operation::Add {
                customer_id,
                name,
                account_id,
            } => {
                let handle = self
                    .bank
                    .add_customer(Customer::new(name, customer_id, account_id));
                self.handles.insert(customer_id, handle);
            }
            Operation::Open(customer_id) => {
                let Some(handle) = self.handle(customer_id) else {
                    return;
                };
                match self.bank.open_account(handle, date) {
                    Ok(information) => info!("{}", information),
                    Err(e) => warn!(customer = %customer_id, "Skipping open: {}", e),
                }
            }
            Operation::Deposit(customer_id, mut amount) => {
                let Some(handle) = self.handle(customer_id) else {
                    return;
                };
                match self.bank.deposit_funds(handle, &mut amount, date) {
                    Ok(applied) => debug!(customer = %customer_id, applied, "deposit"),
                    Err(e) => warn!(customer = %customer_id, "Skipping deposit: {}", e),
                }
            }
            Operation::Withdraw(customer_id, mut amount) => {
                let Some(handle) = self.handle(customer_id) else {
                    return;
                };
                match self.bank.withdraw_funds(handle, &mut amount, date) {
                    Ok(applied) => debug!(customer = %customer_id, applied, "withdrawal"),
                    Err(e) => warn!(customer = %customer_id, "Skipping withdrawal: {}", e),
                }
            }
            Operation::Close(customer_id) => {
                let Some(handle) = self.handle(customer_id) else {
                    return;
                };
                match self.bank.close_account(handle, date) {
                    Ok(customer) => {
                        self.handles.remove(&customer_id);
                        info!("{}", customer.account_information());
                    }
                    Err(e) => warn!(customer = %customer_id, "Skipping close: {}", e),
                }
            }
            Operation::Remove(customer_id) => {
                let Some(handle) = self.handle(customer_id) else {
                    return;
                };
                if self.bank.remove_customer(handle).is_some() {
                    self.handles.remove(&customer_id);
                }
            }
        }
    }
}

/// Replay bank operations from a CSV reader.
///
/// Rows are streamed, so arbitrarily large scripts are not loaded into memory.
/// Malformed rows and refused operations are logged and skipped.
///
/// # CSV Format
///
/// Expected columns: `op, customer, name, account, amount, date`
/// - `op`: add, open, deposit, withdraw, close or remove
/// - `customer`: Customer number (u32)
/// - `name`, `account`: required for `add`
/// - `amount`: Decimal amount, required for `deposit` and `withdraw`
/// - `date`: `day/month/year`, today's date when empty
///
/// # Example
///
/// ```csv
/// op,customer,name,account,amount,date
/// add,1,Mr. Gardiner,1000,,
/// deposit,1,,,1000,27/2/2022
/// withdraw,1,,,300,27/2/2022
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the CSV structure is invalid.
pub fn process_operations<R: Read>(reader: R, bank_name: &str) -> Result<Bank, csv::Error> {
    let mut replay = Replay::new(bank_name);

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    for result in rdr.deserialize::<CsvRecord>() {
        match result {
            Ok(record) => {
                let Some((operation, date)) = record.into_operation() else {
                    warn!("Skipping invalid operation record");
                    continue;
                };
                replay.apply(operation, date);
            }
            Err(e) => {
                warn!("Skipping malformed row: {}", e);
                continue;
            }
        }
    }

    Ok(replay.bank)
}

/// Write the account table to a CSV writer.
///
/// # CSV Format
///
/// Columns: `customer, name, account, balance, open, transactions`
///
/// ```csv
/// customer,name,account,balance,open,transactions
/// 1,Mr. Gardiner,1000,450,true,4
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_accounts<W: Write>(bank: &Bank, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for (_, customer) in bank.customers() {
        wtr.serialize(customer)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write every customer with their last ten transactions, then the bank summary.
pub fn write_history<W: Write>(bank: &Bank, mut writer: W) -> io::Result<()> {
    for (_, customer) in bank.customers() {
        writeln!(writer, "{}", customer)?;
        write!(writer, "{}", customer.recent_transactions())?;
    }
    write!(writer, "{}", bank.display_bank_summary())?;
    writer.flush()
}
