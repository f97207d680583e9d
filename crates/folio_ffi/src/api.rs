//! FFI use-case API for the desktop UI shell.
//!
//! # Responsibility
//! - Expose key construction and guard decisions to Dart via FRB.
//! - Keep error semantics simple: envelopes with a message, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Navigation destinations are configured at most once per process.

use folio_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, make_item_key,
    make_tree_key, ping as ping_inner, AuthData, AuthSnapshot, ContentType, Destinations,
    GuardState, LoggingConfig, NavigationConfig, Zone,
};
use log::warn;
use std::sync::OnceLock;

static DESTINATIONS: OnceLock<Destinations> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match LoggingConfig::parse(&level, &log_dir).and_then(|config| init_logging_inner(&config)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Sets guard redirect destinations from a JSON object
/// (`{"home": "/home", "top": "/"}`).
///
/// # FFI contract
/// - Idempotent for identical destinations; a different second config is
///   rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_navigation(config_json: String) -> String {
    let destinations = match NavigationConfig::from_json_str(&config_json)
        .and_then(|config| config.validate())
    {
        Ok(destinations) => destinations,
        Err(err) => return err.to_string(),
    };

    let active = DESTINATIONS.get_or_init(|| destinations.clone());
    if *active != destinations {
        warn!("event=navigation_reconfigure module=ffi status=rejected");
        return "navigation already configured; refusing to switch".to_string();
    }
    String::new()
}

/// Key envelope returned to the UI cache layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub ok: bool,
    /// Derived wire `type` tag (`note`, `noteTree`).
    pub type_tag: Option<String>,
    /// Canonical JSON form of the key, usable as a cache key string.
    pub key_json: Option<String>,
    pub message: String,
}

impl KeyResponse {
    fn success(type_tag: &str, key_json: String) -> Self {
        Self {
            ok: true,
            type_tag: Some(type_tag.to_string()),
            key_json: Some(key_json),
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            type_tag: None,
            key_json: None,
            message: message.into(),
        }
    }
}

/// Builds an item key for `content_type` (`note|task|event`).
#[flutter_rust_bridge::frb(sync)]
pub fn item_key(content_type: String, id: String) -> KeyResponse {
    let Some(kind) = ContentType::parse(content_type.trim()) else {
        return KeyResponse::failure(format!("unknown content type `{content_type}`"));
    };
    let key = make_item_key(kind, id);
    match serde_json::to_string(&key) {
        Ok(json) => KeyResponse::success(key.type_tag(), json),
        Err(err) => KeyResponse::failure(format!("item_key failed: {err}")),
    }
}

/// Builds a tree key; the returned type tag is `<content_type>Tree`.
#[flutter_rust_bridge::frb(sync)]
pub fn tree_key(content_type: String, project_id: String) -> KeyResponse {
    let Some(kind) = ContentType::parse(content_type.trim()) else {
        return KeyResponse::failure(format!("unknown content type `{content_type}`"));
    };
    let key = make_tree_key(kind, project_id);
    match serde_json::to_string(&key) {
        Ok(json) => KeyResponse::success(key.type_tag(), json),
        Err(err) => KeyResponse::failure(format!("tree_key failed: {err}")),
    }
}

/// Guard decision envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    /// `pending|allowed|denied`, empty on failure.
    pub state: String,
    /// Replace-navigation target when denied.
    pub redirect_to: Option<String>,
    pub message: String,
}

/// Evaluates one auth snapshot for `zone` (`guest|private`).
///
/// `is_authenticated = None` means the provider returned no data.
///
/// # FFI contract
/// - Stateless; the UI owns render/commit sequencing.
/// - Uses default destinations until `configure_navigation` succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn evaluate_guard(
    zone: String,
    is_loading: bool,
    is_authenticated: Option<bool>,
) -> GuardDecision {
    let Some(zone) = Zone::parse(&zone) else {
        return GuardDecision {
            state: String::new(),
            redirect_to: None,
            message: format!("unknown guard zone `{zone}`"),
        };
    };
    let snapshot = AuthSnapshot {
        is_loading,
        data: is_authenticated.map(|is_authenticated| AuthData { is_authenticated }),
    };
    let state = zone.evaluate(Some(&snapshot));
    let redirect_to = match state {
        GuardState::Denied => match active_destinations() {
            Ok(destinations) => Some(zone.redirect_target(&destinations).to_string()),
            Err(message) => {
                return GuardDecision {
                    state: String::new(),
                    redirect_to: None,
                    message,
                }
            }
        },
        GuardState::Pending | GuardState::Allowed => None,
    };

    GuardDecision {
        state: state.as_str().to_string(),
        redirect_to,
        message: String::new(),
    }
}

fn active_destinations() -> Result<Destinations, String> {
    match DESTINATIONS.get() {
        Some(destinations) => Ok(destinations.clone()),
        None => NavigationConfig::default()
            .validate()
            .map_err(|err| format!("default navigation config invalid: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_navigation, core_version, evaluate_guard, init_logging, item_key, ping,
        tree_key,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/folio-logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn item_key_returns_canonical_json() {
        let response = item_key("note".to_string(), "n-1".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.type_tag.as_deref(), Some("note"));
        assert_eq!(
            response.key_json.as_deref(),
            Some(r#"{"type":"note","id":"n-1"}"#)
        );
    }

    #[test]
    fn tree_key_derives_tree_tag() {
        let response = tree_key("event".to_string(), "p-1".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.type_tag.as_deref(), Some("eventTree"));
        assert_eq!(
            response.key_json.as_deref(),
            Some(r#"{"type":"eventTree","projectId":"p-1"}"#)
        );
    }

    #[test]
    fn key_builders_reject_unknown_types() {
        let response = tree_key("folder".to_string(), "p-1".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("folder"));
    }

    #[test]
    fn evaluate_guard_covers_both_zones() {
        let pending = evaluate_guard("private".to_string(), true, Some(true));
        assert_eq!(pending.state, "pending");
        assert_eq!(pending.redirect_to, None);

        let guest = evaluate_guard("guest".to_string(), false, None);
        assert_eq!(guest.state, "allowed");

        let private = evaluate_guard("private".to_string(), false, Some(false));
        assert_eq!(private.state, "denied");
        assert!(private.redirect_to.is_some());
    }

    #[test]
    fn evaluate_guard_rejects_unknown_zone() {
        let decision = evaluate_guard("admin".to_string(), false, None);
        assert!(decision.state.is_empty());
        assert!(decision.message.contains("admin"));
    }

    #[test]
    fn configure_navigation_rejects_relative_paths() {
        let error = configure_navigation(r#"{ "top": "landing" }"#.to_string());
        assert!(error.contains("absolute path"));
    }
}
