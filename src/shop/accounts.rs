use serde::Serialize;
use sha2::{Digest, Sha256};

pub type UserId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    password_hash: String,
}

impl User {
    pub fn new(id: UserId, username: &str, password: &str, email: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(username, password),
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(&self.username, password)
    }
}

/// SHA-256 over the username and password, hex encoded.
pub fn hash_password(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn seed_users() -> Vec<User> {
    vec![User::new(1, "admin", "admin", "admin@shop.com")]
}
