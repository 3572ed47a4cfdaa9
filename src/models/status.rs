use clap::ValueEnum;
use serde::Serialize;

/// Listing filter over the two lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum StatusFilter {
    /// Not yet submitted
    Pending,
    /// Submitted (paid or not)
    Submitted,
    /// Submitted but not paid yet
    Outstanding,
    /// Paid
    Paid,
    /// Not paid yet
    Unpaid,
}

impl StatusFilter {
    /// Required values for (submitted, paid); `None` means "don't care".
    pub fn flags(&self) -> (Option<bool>, Option<bool>) {
        match self {
            StatusFilter::Pending => (Some(false), None),
            StatusFilter::Submitted => (Some(true), None),
            StatusFilter::Outstanding => (Some(true), Some(false)),
            StatusFilter::Paid => (None, Some(true)),
            StatusFilter::Unpaid => (None, Some(false)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Pending => "pending",
            StatusFilter::Submitted => "submitted",
            StatusFilter::Outstanding => "outstanding",
            StatusFilter::Paid => "paid",
            StatusFilter::Unpaid => "unpaid",
        }
    }
}
