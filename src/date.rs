//! Date stamp in the page header

use std::fmt;

use chrono::Datelike;

use crate::dom::Dom;

pub const DATE_ELEMENT_ID: &str = "current-date";

/// Calendar day, shown as `DD/MM/YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl CalendarDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Today in the visitor's local time zone
    pub fn today() -> Self {
        let now = chrono::Local::now();
        Self::new(now.day(), now.month(), now.year())
    }

    /// Write into the header's date element, if present
    pub fn stamp(&self, dom: &mut dyn Dom) {
        if let Some(node) = dom.by_id(DATE_ELEMENT_ID) {
            dom.set_text(node, &self.to_string());
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}
