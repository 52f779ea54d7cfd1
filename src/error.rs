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

//! Error types for bank-level operations.
//!
//! Account and transaction processing never fail: refused requests surface as
//! `false` or as a recorded no-op. These errors only arise where the bank talks
//! to its collaborators (roster handles, amount input, date text).

use crate::base::CustomerHandle;
use thiserror::Error;

/// Bank operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Target account is closed
    #[error("Account is closed!")]
    AccountClosed,

    /// Handle is stale or was issued by another bank
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerHandle),

    /// Amount input is not a decimal number
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Amount source could not produce any input
    #[error("amount unavailable: {0}")]
    AmountUnavailable(String),

    /// Date text is not `day/month/year`
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::LedgerError;
    use crate::base::CustomerHandle;

    #[test]
    fn error_display_messages() {
        assert_eq!(LedgerError::AccountClosed.to_string(), "Account is closed!");
        assert_eq!(
            LedgerError::CustomerNotFound(CustomerHandle(7)).to_string(),
            "customer #7 not found"
        );
        assert_eq!(
            LedgerError::InvalidAmount("abc".into()).to_string(),
            "invalid amount: \"abc\""
        );
        assert_eq!(
            LedgerError::AmountUnavailable("end of input".into()).to_string(),
            "amount unavailable: end of input"
        );
        assert_eq!(
            LedgerError::InvalidDate("1-2-3".into()).to_string(),
            "invalid date: \"1-2-3\""
        );
    }

    #[test]
    fn errors_are_cloneable() {
        let error = LedgerError::AccountClosed;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
