///
/// How an optimistic mutation ended
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Remote service accepted the change
    Confirmed,

    /// Remote service rejected the change and local state was compensated
    RolledBack,

    /// There was nothing to change, remote service was not called
    Skipped,

    /// User did not confirm the change
    Declined,

    /// Remote call finished after unmount or after the user changed, result was ignored
    Discarded,
}
