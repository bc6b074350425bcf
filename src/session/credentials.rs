use serde::{Deserialize, Serialize};

/// A username/password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Fixed, plaintext credential table.
///
/// This is a stand-in for a real identity service: passwords are compared
/// verbatim and nothing is hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTable {
    pub users: Vec<Credential>,
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self {
            users: vec![
                Credential::new("user1", "password1"),
                Credential::new("user2", "password2"),
            ],
        }
    }
}

impl CredentialTable {
    pub fn new(users: Vec<Credential>) -> Self {
        Self { users }
    }

    /// Username of the matching entry, if both fields match exactly
    pub fn verify(&self, username: &str, password: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.username == username && user.password == password)
            .map(|user| user.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_requires_both_fields() {
        let table = CredentialTable::default();
        assert_eq!(table.verify("user1", "password1"), Some("user1"));
        assert_eq!(table.verify("user1", "password2"), None);
        assert_eq!(table.verify("User1", "password1"), None);
        assert_eq!(table.verify("", ""), None);
    }
}
