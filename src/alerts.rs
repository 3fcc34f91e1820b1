use crate::api::models::Alert;
use std::fmt;
use std::str::FromStr;

/// Contracts expiring within this many days are critical.
pub const CRITICAL_MAX_DAYS: i64 = 20;
/// Upper bound (inclusive) of the renewal reminder window.
pub const REMINDER_MAX_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertBucket {
    Critical,
    Reminder,
}

impl AlertBucket {
    pub fn of(days_remaining: i64) -> Option<Self> {
        if days_remaining <= CRITICAL_MAX_DAYS {
            Some(AlertBucket::Critical)
        } else if days_remaining <= REMINDER_MAX_DAYS {
            Some(AlertBucket::Reminder)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertBucket::Critical => "Critical",
            AlertBucket::Reminder => "Upcoming renewal",
        }
    }
}

impl fmt::Display for AlertBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AlertBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(AlertBucket::Critical),
            "reminder" | "reminders" => Ok(AlertBucket::Reminder),
            other => Err(format!("Unknown alert bucket: {}", other)),
        }
    }
}

impl Alert {
    pub fn bucket(&self) -> Option<AlertBucket> {
        AlertBucket::of(self.days_remaining)
    }
}

/// Alerts in `bucket`, in the order the backend listed them.
pub fn in_bucket(alerts: &[Alert], bucket: AlertBucket) -> Vec<&Alert> {
    alerts
        .iter()
        .filter(|a| a.bucket() == Some(bucket))
        .collect()
}

/// Badge counts shown next to the navigation entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertCounts {
    pub critical: usize,
    pub reminder: usize,
}

impl AlertCounts {
    pub fn tally(alerts: &[Alert]) -> Self {
        alerts
            .iter()
            .fold(Self::default(), |mut counts, alert| {
                match alert.bucket() {
                    Some(AlertBucket::Critical) => counts.critical += 1,
                    Some(AlertBucket::Reminder) => counts.reminder += 1,
                    None => {}
                }
                counts
            })
    }
}
