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

//! Where the bank gets deposit and withdrawal amounts from.

use crate::LedgerError;
use rust_decimal::Decimal;
use std::io::BufRead;
use tracing::trace;

/// Supplies an amount when the bank asks for one.
///
/// The bank only asks after it has checked the target account is open, so a
/// source is never consulted for a refused operation.
pub trait AmountSource {
    /// `prompt` names what is being asked for, e.g. `Enter the amount to deposit:`.
    fn next_amount(&mut self, prompt: &str) -> Result<Decimal, LedgerError>;
}

/// A fixed amount.
impl AmountSource for Decimal {
    fn next_amount(&mut self, _prompt: &str) -> Result<Decimal, LedgerError> {
        Ok(*self)
    }
}

/// Reads one line per request and parses it as a decimal.
///
/// Plain (`500.5`) and scientific (`5e2`) notation are accepted.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> AmountSource for LineSource<R> {
    fn next_amount(&mut self, prompt: &str) -> Result<Decimal, LedgerError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| LedgerError::AmountUnavailable(e.to_string()))?;
        if read == 0 {
            return Err(LedgerError::AmountUnavailable("end of input".to_string()));
        }

        let text = line.trim();
        trace!(prompt, input = text, "amount requested");
        parse_amount(text)
    }
}

pub(crate) fn parse_amount(text: &str) -> Result<Decimal, LedgerError> {
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| LedgerError::InvalidAmount(text.to_string()))
}
