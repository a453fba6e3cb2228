use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;

use exodus::auth0::Client;
use exodus::config::Config;
use exodus::records;

/// Outcome of the users flow, used by main to pick the exit code.
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

pub async fn import_users(config: &Config, path: &Path) -> Result<ImportSummary> {
    let rows = records::read_users(path)
        .with_context(|| format!("Could not read users export {}", path.display()))?;

    let total = rows.len();
    let conversion = records::convert_users(rows);

    if !conversion.failures.is_empty() {
        print_failures(&conversion.failures);
    }

    if conversion.users.is_empty() {
        println!("{}", "No convertible users found, skipping job submission".yellow());

        return Ok(ImportSummary {
            imported: 0,
            failed: conversion.failures.len(),
        });
    }

    let client = Client::authenticate(config)
        .await
        .context("Could not authenticate against Auth0")?;

    let job = client
        .import_users(&config.connection_id, &conversion.users)
        .await
        .context("Could not submit the bulk import job")?;

    println!(
        "Submitted import job {} ({}) with {} of {} users",
        job.id.bright_blue().bold(),
        job.status,
        conversion.users.len(),
        total,
    );

    if conversion.failures.is_empty() {
        println!("{}", "All users converted successfully!".green());
    }

    Ok(ImportSummary {
        imported: conversion.users.len(),
        failed: conversion.failures.len(),
    })
}

pub async fn import_roles(config: &Config, path: &Path) -> Result<()> {
    let rows = records::read_roles(path)
        .with_context(|| format!("Could not read roles export {}", path.display()))?;

    let client = Client::authenticate(config)
        .await
        .context("Could not authenticate against Auth0")?;

    let progress = ProgressBar::new(rows.len() as u64);

    for row in rows {
        let role = client
            .create_role(&row.name, &row.description)
            .await
            .with_context(|| format!("Could not create role {}", row.name))?;

        progress.println(format!(
            "Role: {} => {}",
            role.name.bright_blue().bold(),
            role.id
        ));
        progress.inc(1);
    }

    progress.finish_and_clear();

    println!("{}", "All roles created!".green());

    Ok(())
}

fn print_failures(failures: &[records::Failure]) {
    let message = format!(
        "Warning: {} user records could not be converted and will be skipped",
        failures.len()
    )
    .yellow();
    println!("{message}");

    let mut builder = tabled::builder::Builder::new();
    builder.push_record(["Line", "Username", "Reason"]);
    failures.iter().for_each(|f| {
        builder.push_record([f.line.to_string(), f.username.clone(), f.error.to_string()]);
    });
    let mut table = builder.build();
    table.with(tabled::settings::Style::markdown());
    println!("\n{table}\n");
}
