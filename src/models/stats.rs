use serde::Serialize;

/// Aggregate counts and amounts over the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_count: i64,
    pub submitted_count: i64,
    pub paid_count: i64,
    pub total_amount: f64,
    pub submitted_amount: f64,
    pub paid_amount: f64,
}

impl Stats {
    pub fn pending_count(&self) -> i64 {
        self.total_count - self.submitted_count
    }

    pub fn unpaid_count(&self) -> i64 {
        self.total_count - self.paid_count
    }

    pub fn pending_amount(&self) -> f64 {
        self.total_amount - self.submitted_amount
    }

    pub fn unpaid_amount(&self) -> f64 {
        self.total_amount - self.paid_amount
    }

    /// Percentage of `count` over the total; 0 on an empty store.
    pub fn percent(&self, count: i64) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            count as f64 / self.total_count as f64 * 100.0
        }
    }
}
