//! Remote-identity resolution shared by discovery and import, so both agree
//! on what "same remote agent" means.

/// The string correlating a gateway agent with a catalog row: `remote_id`
/// when non-empty, else `name`, else empty.
pub fn resolve_identity(remote_id: Option<&str>, name: Option<&str>) -> String {
    match remote_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => String::new(),
        },
    }
}

/// Display-name fallback chain: `name`, else `label`, else the identity.
pub fn display_name(name: Option<&str>, label: Option<&str>, identity: &str) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => match label {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => identity.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_prefers_remote_id() {
        assert_eq!(resolve_identity(Some("a1"), Some("Bot")), "a1");
    }

    #[test]
    fn identity_falls_back_to_name() {
        assert_eq!(resolve_identity(None, Some("Bot")), "Bot");
        assert_eq!(resolve_identity(Some(""), Some("Bot")), "Bot");
    }

    #[test]
    fn identity_is_empty_when_both_absent() {
        assert_eq!(resolve_identity(None, None), "");
        assert_eq!(resolve_identity(Some(""), Some("")), "");
    }

    #[test]
    fn display_name_prefers_name_then_label_then_identity() {
        assert_eq!(display_name(Some("Bot"), Some("The Bot"), "a1"), "Bot");
        assert_eq!(display_name(None, Some("The Bot"), "a1"), "The Bot");
        assert_eq!(display_name(None, None, "a1"), "a1");
        assert_eq!(display_name(Some(""), Some(""), "a1"), "a1");
    }
}
