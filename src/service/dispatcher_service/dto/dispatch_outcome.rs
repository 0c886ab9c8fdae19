#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,

    /// Channel is not configured, nothing was sent
    Skipped,
}
