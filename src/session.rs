use tracing::info;

/// Local login state. There are no credentials: logging in only unlocks
/// column reordering and remembers what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    privileged: bool,
    identifier: Option<String>,
}

impl Session {
    pub fn logged_in(identifier: impl Into<String>) -> Self {
        let mut session = Self::default();
        session.login(identifier);
        session
    }

    pub fn privileged(&self) -> bool {
        self.privileged
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn login(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into().trim().to_string();
        self.identifier = (!identifier.is_empty()).then_some(identifier);
        self.privileged = true;
        info!("Logged in as {:?}", self.identifier);
    }

    pub fn logout(&mut self) {
        self.privileged = false;
        self.identifier = None;
        info!("Logged out");
    }
}
