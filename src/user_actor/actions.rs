/// Custom actions for user records.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Grants back-office access. Idempotent.
    GrantAdmin,
}

/// Results from UserActions.
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    /// Whether the grant changed anything (false when already admin).
    AdminGranted(bool),
}
