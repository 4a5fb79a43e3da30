use std::fmt;

use crate::error::{BledError, Result};

/// Database provider a template is wired against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Database {
    Turso,
    Cloud,
    Neon,
    Planet,
}

impl Database {
    pub const ALL: [Database; 4] = [
        Database::Turso,
        Database::Cloud,
        Database::Neon,
        Database::Planet,
    ];

    /// The identifier used in flags and template directory names.
    pub fn as_str(self) -> &'static str {
        match self {
            Database::Turso => "turso",
            Database::Cloud => "cloud",
            Database::Neon => "neon",
            Database::Planet => "planet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Database::Turso => "Turso",
            Database::Cloud => "Cloudflare D1",
            Database::Neon => "Neon",
            Database::Planet => "PlanetScale",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Database::Turso | Database::Cloud => "SQLite",
            Database::Neon => "PostgreSQL",
            Database::Planet => "MySQL",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|db| db.as_str() == id)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication flow shipped with a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Auth {
    Plain,
    Creds,
    Social,
    Email,
}

impl Auth {
    pub const ALL: [Auth; 4] = [Auth::Plain, Auth::Creds, Auth::Social, Auth::Email];

    pub fn as_str(self) -> &'static str {
        match self {
            Auth::Plain => "plain",
            Auth::Creds => "creds",
            Auth::Social => "social",
            Auth::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Auth::Plain => "plain",
            Auth::Creds => "credentials authentication",
            Auth::Social => "social authentication",
            Auth::Email => "email authentication",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Auth::Plain => "basic lucia configuration",
            Auth::Creds => "username, password",
            Auth::Social => "an example of github social login",
            Auth::Email => "with verification and password reset flow",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|auth| auth.as_str() == id)
    }
}

impl fmt::Display for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The database flags as given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatabaseFlags {
    pub turso: bool,
    pub cloud: bool,
    pub neon: bool,
    pub planet: bool,
}

impl DatabaseFlags {
    /// The single selected database, `None` if no flag is set.
    ///
    /// Fails with [`BledError::ConflictingFlags`] when more than one is set.
    pub fn selected(&self) -> Result<Option<Database>> {
        at_most_one(
            "database",
            [
                (self.turso, Database::Turso),
                (self.cloud, Database::Cloud),
                (self.neon, Database::Neon),
                (self.planet, Database::Planet),
            ],
        )
    }
}

/// The authentication flags as given on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthFlags {
    pub plain: bool,
    pub creds: bool,
    pub social: bool,
    pub email: bool,
}

impl AuthFlags {
    pub fn selected(&self) -> Result<Option<Auth>> {
        at_most_one(
            "authentication flow",
            [
                (self.plain, Auth::Plain),
                (self.creds, Auth::Creds),
                (self.social, Auth::Social),
                (self.email, Auth::Email),
            ],
        )
    }
}

fn at_most_one<T: Copy + fmt::Display, const N: usize>(
    group: &'static str,
    flags: [(bool, T); N],
) -> Result<Option<T>> {
    let chosen: Vec<T> = flags
        .into_iter()
        .filter_map(|(set, value)| set.then_some(value))
        .collect();

    match chosen.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        many => Err(BledError::ConflictingFlags {
            group,
            flags: many
                .iter()
                .map(|v| format!("--{v}"))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// A fully resolved generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub project_name: String,
    pub database: Database,
    pub auth: Auth,
}
