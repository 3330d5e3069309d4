//! Admin capability check against the reverse proxy's user endpoint.
//!
//! This is not authentication: the proxy has already authenticated the
//! visitor and only reports who it is. A recognised admin gets the
//! mutation controls, everyone else gets a read-only dashboard.

use crate::common::task::{spawn_once, Notify, RuntimeCell};
use crate::dashboard::source::JsonSource;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub username: Option<String>,
    pub is_admin: bool,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("guest")
    }
}

pub fn is_admin(username: &str, admins: &[String]) -> bool {
    let name = username.trim().to_lowercase();
    !name.is_empty() && admins.iter().any(|a| a.trim().to_lowercase() == name)
}

/// Interpret a `{ "user": string | null }` document.
pub fn identity_from_response(doc: &Value, admins: &[String]) -> Identity {
    let username = doc
        .get("user")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string);
    let is_admin = username
        .as_deref()
        .map(|u| is_admin(u, admins))
        .unwrap_or(false);
    Identity { username, is_admin }
}

/// Ask `url` who is visiting. Any failure degrades to anonymous.
pub fn resolve_identity(url: &str, source: &dyn JsonSource, admins: &[String]) -> Identity {
    match source.get_json(url) {
        Ok(doc) => identity_from_response(&doc, admins),
        Err(e) => {
            tracing::info!(error = %e, "identity lookup failed; running read-only");
            Identity::anonymous()
        }
    }
}

/// Identity resolved once on a background thread. Until it lands the
/// dashboard stays read-only.
pub struct IdentityLookup {
    cell: Arc<RuntimeCell<Option<Identity>>>,
}

impl IdentityLookup {
    pub fn spawn(
        url: &str,
        admins: Vec<String>,
        source: Arc<dyn JsonSource>,
        notify: Notify,
    ) -> Self {
        let cell = Arc::new(RuntimeCell::new(None));
        let job_cell = Arc::clone(&cell);
        let url = url.to_string();
        let spawned = spawn_once("identity-lookup", move || {
            let identity = resolve_identity(&url, source.as_ref(), &admins);
            tracing::info!(
                user = identity.display_name(),
                admin = identity.is_admin,
                "identity resolved"
            );
            if job_cell.apply(|slot| *slot = Some(identity)) {
                notify();
            }
        });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to spawn identity lookup");
            cell.apply(|slot| *slot = Some(Identity::anonymous()));
        }
        Self { cell }
    }

    /// Already resolved lookup, used when no proxy is involved.
    pub fn resolved(identity: Identity) -> Self {
        Self {
            cell: Arc::new(RuntimeCell::new(Some(identity))),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.cell.snapshot().is_none()
    }

    /// Current identity; anonymous while the lookup is still running.
    pub fn current(&self) -> Identity {
        self.cell.snapshot().unwrap_or_default()
    }
}

impl Drop for IdentityLookup {
    fn drop(&mut self) {
        self.cell.retire();
    }
}
