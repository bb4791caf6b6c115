//! Delegate tracking records as stored in the CSV file.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display and storage format of follow-up dates, e.g. `03 June 2025`
pub const FOLLOW_UP_FORMAT: &str = "%d %B %Y";

/// Column headers of the backing CSV, in order
pub const COLUMNS: [&str; 4] = ["Name", "Contact Info", "Response Status", "Follow-up Date"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    Interested,
    #[serde(rename = "No Response")]
    NoResponse,
    Registered,
    Rejected,
}

impl ResponseStatus {
    pub const ALL: [ResponseStatus; 4] = [
        ResponseStatus::Interested,
        ResponseStatus::NoResponse,
        ResponseStatus::Registered,
        ResponseStatus::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResponseStatus::Interested => "Interested",
            ResponseStatus::NoResponse => "No Response",
            ResponseStatus::Registered => "Registered",
            ResponseStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ResponseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseStatus::ALL
            .into_iter()
            .find(|status| status.label() == s.trim())
            .ok_or_else(|| format!("unknown response status '{s}'"))
    }
}

/// One tracked delegate. `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Contact Info", default)]
    pub contact_info: String,
    #[serde(rename = "Response Status")]
    pub response_status: ResponseStatus,
    /// `None` when the stored cell is empty or unparseable
    #[serde(rename = "Follow-up Date", with = "follow_up_date")]
    pub follow_up_date: Option<NaiveDate>,
}

impl DelegateRecord {
    /// Follow-up date as shown in the table, empty when unset
    pub fn follow_up_display(&self) -> String {
        self.follow_up_date
            .map(|date| date.format(FOLLOW_UP_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Every field in its display form, in column order
    pub fn fields(&self) -> [String; 4] {
        [
            self.name.clone(),
            self.contact_info.clone(),
            self.response_status.to_string(),
            self.follow_up_display(),
        ]
    }
}

/// Parse a follow-up date in either the stored form or ISO `YYYY-MM-DD`
/// (what HTML date inputs submit).
pub fn parse_follow_up(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, FOLLOW_UP_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

mod follow_up_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{FOLLOW_UP_FORMAT, parse_follow_up};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FOLLOW_UP_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    // Unparseable cells become `None` rather than failing the whole file
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_follow_up))
    }
}
