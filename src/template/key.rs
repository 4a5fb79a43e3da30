use std::fmt;

use crate::config::{Auth, Database};

const KEY_PREFIX: &str = "bled-";

/// Lookup key of a template bundle, rendered as `bled-<database>-<auth>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateKey {
    pub database: Database,
    pub auth: Auth,
}

impl TemplateKey {
    pub fn new(database: Database, auth: Auth) -> Self {
        Self { database, auth }
    }

    /// Parse a bundle directory name back into a key.
    ///
    /// Returns `None` for names that don't follow the `bled-<database>-<auth>`
    /// layout or name an unknown database or auth flow.
    pub fn parse(dir_name: &str) -> Option<Self> {
        let rest = dir_name.strip_prefix(KEY_PREFIX)?;
        let (database, auth) = rest.split_once('-')?;
        Some(Self::new(Database::from_id(database)?, Auth::from_id(auth)?))
    }

    pub fn dir_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KEY_PREFIX}{}-{}", self.database, self.auth)
    }
}

/// Compose the bundle key for a database/auth pair.
pub fn resolve_template_key(database: Database, auth: Auth) -> TemplateKey {
    TemplateKey::new(database, auth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Database::Turso, Auth::Plain, "bled-turso-plain")]
    #[case(Database::Cloud, Auth::Creds, "bled-cloud-creds")]
    #[case(Database::Neon, Auth::Social, "bled-neon-social")]
    #[case(Database::Planet, Auth::Email, "bled-planet-email")]
    fn test_resolve_template_key(
        #[case] database: Database,
        #[case] auth: Auth,
        #[case] expected: &str,
    ) {
        let key = resolve_template_key(database, auth);
        assert_eq!(key.dir_name(), expected);
        assert_eq!(TemplateKey::parse(expected), Some(key));
    }

    #[rstest]
    #[case("bled-turso")]
    #[case("turso-plain")]
    #[case("bled-mongo-plain")]
    #[case("bled-neon-oauth")]
    #[case("bled-neon-plain-extra")]
    #[case("")]
    fn test_parse_rejects_foreign_names(#[case] name: &str) {
        assert_eq!(TemplateKey::parse(name), None);
    }
}
