///
/// Counters of a single sweep pass
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub due: usize,
    pub notified: usize,
    pub skipped_empty_email: usize,

    /// Capsules that another sweeper marked in the meantime
    pub already_handled: usize,

    /// Capsules left for the next pass
    pub failed: usize,
}
