// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! The credential directory: a fixed, read-only set of identity records.
//!
//! Records are seeded once at process start and never change afterwards
//! (there is no registration flow). Passwords are stored as salted Argon2
//! hashes; the plaintext only exists transiently while seeding.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;

use super::roles::Role;

/// A stored account with credentials and role.
///
/// The password hash never leaves this module; everything downstream of
/// authentication works with the stripped [`Identity`] view.
#[derive(Debug, Clone)]
pub struct IdentityRecord {
    /// Opaque identifier, stable across sessions
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique email, stored normalized
    pub email: String,
    /// Salted Argon2 hash of the password (PHC string)
    password_hash: String,
    /// Role granted at sign-in
    pub role: Role,
    /// Whether the email has been verified
    pub email_verified: bool,
    /// Optional contact phone
    pub phone: Option<String>,
}

/// Password-stripped identity, as handed to the session issuer and exposed
/// to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    /// Opaque identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Granted role
    pub role: Role,
    /// Optional contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl IdentityRecord {
    /// Strip the credential material, leaving the public identity.
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            phone: self.phone.clone(),
        }
    }

    /// Verify a candidate password against the stored hash.
    ///
    /// Comparison is case-sensitive by construction: the hash only verifies
    /// for the exact byte sequence that was hashed at seed time.
    pub fn verify_password(&self, candidate: &str) -> bool {
        if let Ok(parsed) = PasswordHash::new(&self.password_hash) {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        } else {
            false
        }
    }
}

/// Normalize an email for lookup: NFKC, trimmed, lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().nfkc().collect::<String>().to_lowercase()
}

fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|_| password_hash::Error::Crypto)?;
    let salt = SaltString::encode_b64(&salt_bytes)?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(phc)
}

/// Read-only directory of identity records.
///
/// Safely shareable across concurrent requests: nothing here mutates after
/// construction.
#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    records: Vec<IdentityRecord>,
}

/// Seed input for one directory record. Plaintext password is consumed and
/// hashed during [`CredentialDirectory::seed`].
pub struct SeedRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub email_verified: bool,
    pub phone: Option<&'static str>,
}

impl CredentialDirectory {
    /// Build a directory from seed records, hashing each password.
    pub fn seed(seeds: Vec<SeedRecord>) -> Result<Self, password_hash::Error> {
        let mut records = Vec::with_capacity(seeds.len());
        for seed in seeds {
            records.push(IdentityRecord {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                email: normalize_email(seed.email),
                password_hash: hash_password(seed.password)?,
                role: seed.role,
                email_verified: seed.email_verified,
                phone: seed.phone.map(str::to_string),
            });
        }
        Ok(Self { records })
    }

    /// The demo directory shipped with the site.
    pub fn demo() -> Result<Self, password_hash::Error> {
        Self::seed(vec![
            SeedRecord {
                id: "admin-001",
                name: "Super Admin",
                email: "admin@azefine.com",
                password: "admin123",
                role: Role::Admin,
                email_verified: true,
                phone: Some("08123456789"),
            },
            SeedRecord {
                id: "user-001",
                name: "Budi Santoso",
                email: "user@example.com",
                password: "user123",
                role: Role::User,
                email_verified: true,
                phone: Some("08129876543"),
            },
        ])
    }

    /// Look up a record by email. Lookup is case-insensitive.
    pub fn find_by_email(&self, email: &str) -> Option<&IdentityRecord> {
        let needle = normalize_email(email);
        self.records.iter().find(|r| r.email == needle)
    }

    /// Number of seeded records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the password-stripped identities.
    pub fn identities(&self) -> impl Iterator<Item = Identity> + '_ {
        self.records.iter().map(IdentityRecord::to_identity)
    }
}
