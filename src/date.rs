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

//! Calendar dates used to stamp transactions.
//!
//! A [`CalendarDate`] is a plain day/month/year triple. No calendar validation
//! is performed: `CalendarDate::new(31, 2, 2021)` is accepted and rendered as-is.

use crate::LedgerError;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    day: i32,
    month: i32,
    year: i32,
}

impl CalendarDate {
    pub const fn new(day: i32, month: i32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Current date in the local time zone.
    pub fn today() -> Self {
        let now = Local::now().date_naive();
        Self::new(now.day() as i32, now.month() as i32, now.year())
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

/// Parses `day/month/year`, e.g. `23/4/2021`. Surrounding whitespace is ignored.
impl FromStr for CalendarDate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidDate(s.to_string());

        let mut parts = s.trim().split('/');
        let mut next = || -> Result<i32, LedgerError> {
            parts
                .next()
                .ok_or_else(invalid)?
                .trim()
                .parse()
                .map_err(|_| invalid())
        };

        let day = next()?;
        let month = next()?;
        let year = next()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(day, month, year))
    }
}
