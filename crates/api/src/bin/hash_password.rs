// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Prints an argon2 hash suitable for the `pass` field of a user record.
//!
//! Usage: `hash-password <password>`, or pipe the password on stdin.

use std::{error::Error, io::BufRead};

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let password = match std::env::args().nth(1) {
        Some(password) => password,
        None => {
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        return Err("password must not be empty".into());
    }

    let hash = countdown_api::graphql::auth::hash_password(&password)
        .map_err(|e| format!("hashing failed: {e}"))?;
    println!("{hash}");
    Ok(())
}
