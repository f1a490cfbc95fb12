use crate::model::repository::UserAccount;

/// how much of the account's limit is in use, as a percentage.
/// Not clamped, so drift or an allowed over-quota upload can report more than 100
pub fn usage_percentage(storage_used: u64, storage_limit: u64) -> f64 {
    if storage_limit == 0 {
        return 0.0;
    }
    storage_used as f64 * 100.0 / storage_limit as f64
}

/// whether adding `incoming` bytes would put the account over its limit
pub fn would_exceed(storage_used: u64, storage_limit: u64, incoming: u64) -> bool {
    storage_used.saturating_add(incoming) > storage_limit
}

impl UserAccount {
    pub fn usage_percentage(&self) -> f64 {
        usage_percentage(self.storage_used, self.storage_limit)
    }

    pub fn would_exceed(&self, incoming: u64) -> bool {
        would_exceed(self.storage_used, self.storage_limit, incoming)
    }
}
