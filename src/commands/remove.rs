use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::error::AppError;
use crate::invoke::invoke_removal;
use crate::scanner::Scanner;
use crate::utils::format_bytes;

pub struct RemoveOptions {
    pub name: String,
    pub verbose: bool,
    pub assume_yes: bool,
}

pub fn execute_remove(options: RemoveOptions) -> Result<(), AppError> {
    let config = Config::load()?;
    let scanner = Scanner::new(config)?;
    let report = scanner.scan(options.verbose)?;

    let record = report
        .find_by_name(&options.name)
        .ok_or_else(|| AppError::UnknownApp(options.name.clone()))?;

    if !record.has_removal_command() {
        return Err(AppError::NoRemovalCommand(record.name.clone()));
    }

    println!(
        "{} ({}, idle {} day(s))",
        record.name,
        format_bytes(record.size_bytes),
        record.days_idle
    );
    println!("Removal command: {}", record.removal_command);

    if !options.assume_yes {
        print!("Launch it? [y/N] ");
        io::stdout().flush()?;
        match confirm_removal(io::stdin().lock()) {
            Ok(()) => {}
            Err(AppError::Cancelled) => {
                println!("Aborted. Nothing was removed.");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
    }

    invoke_removal(&record.removal_command)?;
    println!("Removal command launched for '{}'.", record.name);
    Ok(())
}

fn confirm_removal(mut input: impl BufRead) -> Result<(), AppError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    if matches!(answer.as_str(), "y" | "yes") {
        Ok(())
    } else {
        Err(AppError::Cancelled)
    }
}
