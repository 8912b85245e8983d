//! Deployment environment value type
//!
//! An `Environment` is the resolved target of a single invocation: a name
//! ("staging", "production"), the application it hosts, and the SSH
//! destination used for remote execution. Resolved once, immutable after.

/// A named deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Environment name, e.g. "staging"
    pub name: String,
    /// Application name as configured, e.g. "MyApp"
    pub application: String,
    /// Application root path on the remote host, e.g. "/srv/app"
    pub app_root: String,
    /// SSH destination (user@host or host)
    pub destination: String,
}

impl Environment {
    /// Application name folded into a form safe for remote file names.
    ///
    /// Lowercased ASCII; anything outside `[a-z0-9_.-]` becomes `_`.
    pub fn sanitized_application_name(&self) -> String {
        self.application
            .chars()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Public document root served by the web server.
    pub fn public_root(&self) -> String {
        format!("{}/public", self.app_root.trim_end_matches('/'))
    }
}
