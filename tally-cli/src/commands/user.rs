//! User command - a user, and optionally an admin built around one

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Password;
use tally_core::{Admin, EntryPoint, User};

use super::{get_logger, log_failure, log_success, value_or_prompt};
use crate::output;

pub fn run(
    data_dir: &Path,
    first_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<String>,
    admin_email: Option<String>,
) -> Result<()> {
    let logger = get_logger(data_dir, EntryPoint::Command);

    let first_name = value_or_prompt(first_name, "Please enter your first name")?;
    let last_name = value_or_prompt(last_name, "Please enter your last name")?;
    let birth_date = value_or_prompt(birth_date, "Please enter your birthdate (MM/DD/YYYY)")?;

    let mut user = match User::new(first_name, last_name, birth_date) {
        Ok(user) => user,
        Err(e) => {
            log_failure(&logger, "user", &e);
            return Err(e.into());
        }
    };

    println!("{}", "User".bold());
    show(&user);
    user.clear_user_name();
    show(&user);

    log_success(&logger, "user");

    if let Some(email) = admin_email {
        println!();
        let password = Password::new()
            .with_prompt("Admin password")
            .allow_empty_password(true)
            .interact()?;

        let mut admin = match Admin::new(email, &password) {
            Ok(admin) => admin,
            Err(e) => {
                log_failure(&logger, "user admin", &e);
                return Err(e.into());
            }
        };
        println!("{}", "Admin".bold());
        show(admin.as_ref());
        admin.clear_user_name();
        show(admin.as_ref());
        output::info(&format!("Admin {} created", admin.email()));
        log_success(&logger, "user admin");
    }

    Ok(())
}

fn show(user: &User) {
    println!("{}", user.output_details());
}
