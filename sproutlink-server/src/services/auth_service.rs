use argon2::password_hash::{SaltString, rand_core};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash};

use crate::models::User;

#[derive(Clone, Default)]
pub struct AuthService {
    hasher: Argon2<'static>,
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            hasher: Argon2::default(),
        }
    }

    pub fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let hash_salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self.hasher.hash_password(password.as_bytes(), &hash_salt)?;

        Ok(hash.to_string())
    }

    pub fn verify(&self, user: &User, password: &str) -> Result<bool, password_hash::Error> {
        let parsed_hash = PasswordHash::new(&user.password)?;

        Ok(self
            .hasher
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let auth_service = AuthService::new();
        let password = "test";

        let hash = auth_service.hash(password).unwrap();
        assert!(hash.starts_with("$argon2"));

        let user = User {
            id: 0,
            email: String::new(),
            password: hash,
            role: String::new(),
        };

        assert!(auth_service.verify(&user, password).unwrap());
        assert!(!auth_service.verify(&user, "wrong").unwrap());
    }
}
