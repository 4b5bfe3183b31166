//! In-memory user directory, rebuilt from the workspace roster on each
//! connection.

use crate::base::types::User;

/// Directory of known users in the order the roster delivered them.
///
/// Lookups deliberately iterate instead of hashing: mention tokens match
/// display names by substring containment in either direction, so there is
/// no exact key to hash on.
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Consumes the full roster. Roster order is preserved and is the
    /// iteration order for resolution, which makes first-match-wins
    /// deterministic across runs.
    pub fn from_roster(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolves a raw mention token (including its leading `@`) to a user ID.
    ///
    /// A user matches when their display name is contained in the raw token,
    /// or when the token minus its leading `@` is contained in the display
    /// name. The first matching entry in roster order wins; `None` means the
    /// token should be dropped.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let bare = token.strip_prefix('@').unwrap_or(token);
        self.users
            .iter()
            .find(|user| token.contains(&user.name) || user.name.contains(bare))
            .map(|user| user.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(entries: &[(&str, &str)]) -> UserDirectory {
        UserDirectory::from_roster(
            entries
                .iter()
                .map(|(name, id)| User {
                    name: name.to_string(),
                    id: id.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn resolves_partial_first_name_against_full_display_name() {
        let directory = directory(&[("john smith", "U1")]);
        assert_eq!(directory.resolve("@john"), Some("U1"));
    }

    #[test]
    fn resolves_when_display_name_is_contained_in_token() {
        let directory = directory(&[("jo", "U4")]);
        assert_eq!(directory.resolve("@john"), Some("U4"));
    }

    #[test]
    fn first_roster_entry_wins_on_ambiguous_tokens() {
        let directory = directory(&[("john smith", "U1"), ("john doe", "U2")]);
        assert_eq!(directory.resolve("@john"), Some("U1"));
    }

    #[test]
    fn unmatched_token_resolves_to_none() {
        let directory = directory(&[("alice wu", "U9")]);
        assert_eq!(directory.resolve("@zed"), None);
    }

    #[test]
    fn empty_directory_resolves_nothing() {
        let directory = directory(&[]);
        assert_eq!(directory.resolve("@anyone"), None);
        assert!(directory.is_empty());
    }
}
