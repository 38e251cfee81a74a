//! Checking / out-of-bounds policy resolution
//!
//! Precedence: host integration override, then local config, then a
//! device-model denylist (devices that already draw their own boundary).

use crate::config::PolicyMode;

/// True when `device_name` contains any denylist entry (case-insensitive)
pub fn has_own_play_area(device_name: &str, denylist: &[String]) -> bool {
    let name = device_name.to_lowercase();
    denylist
        .iter()
        .filter(|entry| !entry.is_empty())
        .any(|entry| name.contains(&entry.to_lowercase()))
}

/// Resolve one policy
pub fn resolve_policy(
    host_override: PolicyMode,
    local: PolicyMode,
    device_name: &str,
    denylist: &[String],
) -> bool {
    host_override
        .decided()
        .or_else(|| local.decided())
        .unwrap_or_else(|| !has_own_play_area(device_name, denylist))
}

/// Both policies, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policies {
    /// Drive the warning ribbon
    pub check_play_area: bool,
    /// Run the bounds state machine
    pub use_out_of_bounds: bool,
}

impl Policies {
    pub fn resolve(
        host_checking: PolicyMode,
        host_out_of_bounds: PolicyMode,
        local_checking: PolicyMode,
        local_out_of_bounds: PolicyMode,
        device_name: &str,
        denylist: &[String],
    ) -> Self {
        let policies = Self {
            check_play_area: resolve_policy(host_checking, local_checking, device_name, denylist),
            use_out_of_bounds: resolve_policy(host_out_of_bounds, local_out_of_bounds, device_name, denylist),
        };
        log::debug!(
            "Resolved policies for '{}': check={}, out_of_bounds={}",
            device_name,
            policies.check_play_area,
            policies.use_out_of_bounds
        );
        policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denylist() -> Vec<String> {
        vec!["Quest".to_string(), "vive focus".to_string()]
    }

    #[test]
    fn test_denylist_match_is_case_insensitive() {
        assert!(has_own_play_area("Oculus Quest 2", &denylist()));
        assert!(has_own_play_area("HTC VIVE FOCUS 3", &denylist()));
        assert!(!has_own_play_area("Valve Index", &denylist()));
        assert!(!has_own_play_area("anything", &[String::new()]));
    }

    #[test]
    fn test_override_beats_local() {
        assert!(resolve_policy(PolicyMode::Enabled, PolicyMode::Disabled, "Quest", &denylist()));
        assert!(!resolve_policy(PolicyMode::Disabled, PolicyMode::Enabled, "Index", &denylist()));
    }

    #[test]
    fn test_local_beats_denylist() {
        assert!(resolve_policy(PolicyMode::Auto, PolicyMode::Enabled, "Quest", &denylist()));
        assert!(!resolve_policy(PolicyMode::Auto, PolicyMode::Disabled, "Index", &denylist()));
    }

    #[test]
    fn test_auto_falls_back_to_denylist() {
        assert!(!resolve_policy(PolicyMode::Auto, PolicyMode::Auto, "Quest Pro", &denylist()));
        assert!(resolve_policy(PolicyMode::Auto, PolicyMode::Auto, "Valve Index", &denylist()));
        assert!(resolve_policy(PolicyMode::Auto, PolicyMode::Auto, "Quest", &[]));
    }

    #[test]
    fn test_policies_resolve_independently() {
        let policies = Policies::resolve(
            PolicyMode::Auto,
            PolicyMode::Disabled,
            PolicyMode::Auto,
            PolicyMode::Enabled,
            "Valve Index",
            &denylist(),
        );
        assert!(policies.check_play_area);
        assert!(!policies.use_out_of_bounds);
    }
}
