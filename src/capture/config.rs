/// Tunables for a capture session.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// How many recent observations the rolling history keeps.
    pub history_capacity: usize,

    /// Upper bound on a single detection call. Expiry is reported as a
    /// detection failure rather than leaving the session stuck detecting.
    pub detect_timeout_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            history_capacity: 5,
            detect_timeout_secs: 10,
        }
    }
}
