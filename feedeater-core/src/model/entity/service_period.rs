use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// the dates a trip runs: a weekly pattern bounded by a date range, plus
/// explicit additions and exceptions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Monday first
    pub days_of_week: [bool; 7],
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub added_dates: BTreeSet<NaiveDate>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub except_dates: BTreeSet<NaiveDate>,
}

impl ServicePeriod {
    /// true if service runs on the given date.
    pub fn is_active(&self, date: &NaiveDate) -> bool {
        if self.except_dates.contains(date) {
            return false;
        }
        if self.added_dates.contains(date) {
            return true;
        }
        let weekday = date.weekday().num_days_from_monday() as usize;
        self.start_date <= *date && *date <= self.end_date && self.days_of_week[weekday]
    }

    /// widens the date range so that every added date falls within it. a
    /// service defined only through calendar dates starts with an empty weekly
    /// pattern and takes its range from its added dates.
    pub fn expand_to_added_dates(&mut self) {
        if let Some(first) = self.added_dates.first() {
            self.start_date = self.start_date.min(*first);
        }
        if let Some(last) = self.added_dates.last() {
            self.end_date = self.end_date.max(*last);
        }
    }
}
