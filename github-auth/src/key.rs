use std::fmt;

const PROFILE_BASE_URL: &str = "https://github.com";

/// One public key registered to a GitHub user.
///
/// Keys are plain values: two keys are equal when both the owner and the key
/// material match. The key material is kept opaque and is never validated.
///
/// `Display` renders an `authorized_keys` line with the owner's profile URL
/// as the comment:
/// ```
/// # use github_auth::Key;
/// let key = Key::new("chrishunt", "ssh-ed25519 AAAAC3Nza");
/// assert_eq!(
///     key.to_string(),
///     "ssh-ed25519 AAAAC3Nza https://github.com/chrishunt"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    username: String,
    key: String,
}

impl Key {
    /// Create a key owned by `username`.
    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// The username this key belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The raw key material, e.g. `ssh-rsa AAAA...`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The owner's GitHub profile URL.
    pub fn profile_url(&self) -> String {
        format!("{PROFILE_BASE_URL}/{}", self.username)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.profile_url())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_needs_owner_and_material() {
        let key = Key::new("chrishunt", "abc123");

        assert_eq!(key, Key::new("chrishunt", "abc123"));
        assert_ne!(key, Key::new("chrishunt", "def456"));
        assert_ne!(key, Key::new("someone-else", "abc123"));
    }

    #[test]
    fn equal_keys_collapse_in_a_set() {
        let set: HashSet<Key> = [
            Key::new("chrishunt", "abc123"),
            Key::new("chrishunt", "abc123"),
            Key::new("chrishunt", "def456"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors() {
        let key = Key::new("chrishunt", "abc123");

        assert_eq!(key.username(), "chrishunt");
        assert_eq!(key.key(), "abc123");
        assert_eq!(key.profile_url(), "https://github.com/chrishunt");
    }
}
