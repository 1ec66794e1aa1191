//! Caller identity used to authenticate calls to the generative service.

/// An API key captured for one or more service calls.
///
/// The secret is never printed by `Debug`.
///
/// # Examples
///
/// ```
/// use atelier_core::Credential;
///
/// let key = Credential::new("sk-secret");
/// assert_eq!(key.expose(), "sk-secret");
/// assert!(!format!("{:?}", key).contains("sk-secret"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    /// Wrap an API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for placing on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
