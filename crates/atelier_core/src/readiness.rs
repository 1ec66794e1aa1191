//! API key readiness states.

/// Whether a usable credential has been selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Readiness {
    /// The authorization collaborator has not answered yet
    #[default]
    #[display("checking")]
    Checking,
    /// A credential is available
    #[display("ready")]
    Ready,
    /// No credential is available; the user must select one
    #[display("not ready")]
    NotReady,
}

impl Readiness {
    /// True only in the [`Readiness::Ready`] state.
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}
