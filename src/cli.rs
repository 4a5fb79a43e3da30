use std::path::PathBuf;

use bled::config::{AuthFlags, DatabaseFlags};
use clap::{ArgAction, Args, Parser};

#[derive(Parser)]
#[command(
    name = "create-bled-app",
    about = "Scaffold a BLED stack server (Bun, Lucia, Elysia, Drizzle) from a template",
    version
)]
pub struct Cli {
    /// The name of the project
    pub project: Option<String>,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    /// Directory containing the bled-<database>-<auth> templates
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// List available templates and exit
    #[arg(long)]
    pub list: bool,

    /// Show the files that would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args)]
#[command(next_help_heading = "Database (choose one)")]
pub struct DatabaseArgs {
    /// Turso (SQLite)
    #[arg(long)]
    pub turso: bool,

    /// Cloudflare D1 (SQLite)
    #[arg(long)]
    pub cloud: bool,

    /// Neon (PostgreSQL)
    #[arg(long)]
    pub neon: bool,

    /// PlanetScale (MySQL)
    #[arg(long)]
    pub planet: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Template (choose one)")]
pub struct AuthArgs {
    /// Clone a template without login and signup
    #[arg(short, long)]
    pub plain: bool,

    /// Clone a template with username login and signup
    #[arg(short, long)]
    pub creds: bool,

    /// Clone a template with social authentication
    #[arg(short, long)]
    pub social: bool,

    /// Clone a template with email authentication flow
    #[arg(short, long)]
    pub email: bool,
}

impl From<DatabaseArgs> for DatabaseFlags {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            turso: args.turso,
            cloud: args.cloud,
            neon: args.neon,
            planet: args.planet,
        }
    }
}

impl From<AuthArgs> for AuthFlags {
    fn from(args: AuthArgs) -> Self {
        Self {
            plain: args.plain,
            creds: args.creds,
            social: args.social,
            email: args.email,
        }
    }
}
