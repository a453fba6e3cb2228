use std::path::Path;

use crate::auth0::ImportUser;
use crate::hash;

mod error;
pub use error::Error;

/// One row of the users export: `username; email; passwordHash(base64)`.
///
/// `line` is the 1-based line of the row in the export, kept so failures
/// can be traced back even when usernames are duplicated or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub line: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// One row of the roles export: `name; description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRow {
    pub name: String,
    pub description: String,
}

/// Result of converting a users export, split into importable records and
/// records whose password hash could not be reformatted.
#[derive(Debug, Default)]
pub struct Conversion {
    pub users: Vec<ImportUser>,
    pub failures: Vec<Failure>,
}

#[derive(Debug)]
pub struct Failure {
    pub line: u64,
    pub username: String,
    pub error: hash::Error,
}

pub fn read_users(path: &Path) -> Result<Vec<UserRow>, Error> {
    let mut reader = csv_reader(path)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;

        rows.push(UserRow {
            line: line_of(&record),
            username: field(&record, 0)?,
            email: field(&record, 1)?,
            password_hash: field(&record, 2)?,
        });
    }

    Ok(rows)
}

pub fn read_roles(path: &Path) -> Result<Vec<RoleRow>, Error> {
    let mut reader = csv_reader(path)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;

        rows.push(RoleRow {
            name: field(&record, 0)?,
            description: field(&record, 1)?,
        });
    }

    Ok(rows)
}

/// Reformats every password hash, keeping convertible and failed records
/// apart so the caller can decide on a skip or abort policy.
#[must_use]
pub fn convert_users(rows: Vec<UserRow>) -> Conversion {
    let mut conversion = Conversion::default();

    for row in rows {
        match hash::reformat(&row.password_hash) {
            Ok(phc) => conversion
                .users
                .push(ImportUser::new(row.username, row.email, phc)),
            Err(error) => conversion.failures.push(Failure {
                line: row.line,
                username: row.username,
                error,
            }),
        }
    }

    conversion
}

fn csv_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, Error> {
    // Header row is consumed by the reader and never yielded as a record
    let reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_path(path)?;

    Ok(reader)
}

fn field(record: &csv::StringRecord, index: usize) -> Result<String, Error> {
    record
        .get(index)
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingField {
            line: line_of(record),
            index,
        })
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}
