use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "Exodus",
    author,
    version,
    about = "Migrates ASP.NET Identity v2 users and roles into an Auth0 tenant"
)]
pub struct Cli {
    /// Import users from the identity export
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "data/users.csv"
    )]
    pub users: Option<PathBuf>,

    /// Create roles from the identity export
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "data/roles.csv"
    )]
    pub roles: Option<PathBuf>,
}
