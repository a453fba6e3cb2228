use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use args::Cli;
use exodus::config::Config;

mod args;
mod commands;

fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let color = buf.default_level_style(record.level());

            writeln!(
                buf,
                "{} {color}{}{color:#} - {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Exit codes: 0 on success, 1 when a flow aborted, 3 when every flow
// finished but some user records failed conversion. 2 is left to clap,
// which uses it for usage errors.
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logger();

    let args = Cli::parse();

    if args.users.is_none() && args.roles.is_none() {
        println!("Nothing to do, pass --users and/or --roles");
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return ExitCode::FAILURE;
        }
    };

    let mut failed_records = 0;

    if let Some(path) = args.users {
        println!("Import users started");

        match commands::import_users(&config, &path).await {
            Ok(summary) => {
                log::info!(
                    "Users flow finished: {} imported, {} failed",
                    summary.imported,
                    summary.failed
                );
                failed_records += summary.failed;
            }
            Err(e) => return abort(&e),
        }
    }

    if let Some(path) = args.roles {
        println!("Import roles started");

        if let Err(e) = commands::import_roles(&config, &path).await {
            return abort(&e);
        }
    }

    if failed_records > 0 {
        ExitCode::from(3)
    } else {
        ExitCode::SUCCESS
    }
}

fn abort(error: &anyhow::Error) -> ExitCode {
    eprintln!("{} {error:#}", "Error:".red());
    ExitCode::FAILURE
}
