use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

pub type EmailId = String;

/// Placeholder used when a message has no `Subject` header and the subject
/// is fed to the summarizer. List display shows nothing instead.
pub const NO_SUBJECT: &str = "No Subject";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Normalized message, independent of the provider's payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: EmailId,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
}

impl Email {
    /// Exact, case-sensitive lookup; first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    pub fn subject(&self) -> Option<&str> {
        self.header("Subject")
    }

    pub fn from(&self) -> Option<&str> {
        self.header("From")
    }

    pub fn summary_subject(&self) -> &str {
        self.subject().unwrap_or(NO_SUBJECT)
    }

    pub fn display_date(&self) -> String {
        format_internal_date(self.internal_date.as_deref(), &Local)
    }
}

/// Render an epoch-millisecond string as e.g. `Oct 17, 2026, 3:04 PM`.
/// Absent or unparsable input renders as the empty string.
pub fn format_internal_date<Tz>(ms: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(ms) = ms.and_then(|s| s.trim().parse::<i64>().ok()) else {
        return String::new();
    };
    match tz.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn email_with(headers: Vec<Header>) -> Email {
        Email {
            id: "m1".into(),
            headers,
            ..Default::default()
        }
    }

    #[test]
    fn header_lookup_is_case_sensitive() {
        let e = email_with(vec![Header::new("subject", "lower")]);
        assert_eq!(e.subject(), None);
        assert_eq!(e.header("subject"), Some("lower"));
    }

    #[test]
    fn missing_subject_differs_between_list_and_summary() {
        let e = email_with(vec![Header::new("From", "a@b.c")]);
        assert_eq!(e.subject(), None);
        assert_eq!(e.summary_subject(), NO_SUBJECT);
        assert_eq!(e.from(), Some("a@b.c"));
    }

    #[test]
    fn formats_epoch_millis() {
        // 2024-03-05T14:07:00Z
        let out = format_internal_date(Some("1709647620000"), &Utc);
        assert_eq!(out, "Mar 5, 2024, 2:07 PM");
    }

    #[test]
    fn absent_or_bad_date_renders_empty() {
        assert_eq!(format_internal_date(None, &Utc), "");
        assert_eq!(format_internal_date(Some("soon"), &Utc), "");
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let e = Email {
            id: "x".into(),
            snippet: "hi".into(),
            headers: vec![],
            internal_date: Some("1".into()),
            body_text: None,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["internalDate"], "1");
        assert!(v.get("bodyText").is_none());
    }
}
