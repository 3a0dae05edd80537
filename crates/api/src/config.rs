// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Process configuration, read once at startup from the environment.

use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 4000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    Missing(&'static str),
    #[error("Environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Database name plus the collection names used inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogNames {
    pub database: String,
    pub courses: String,
    pub divisions: String,
    pub minors: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamedayNames {
    pub database: String,
    pub games: String,
    pub users: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNames {
    pub database: String,
    pub links: String,
    pub tutorials: String,
    pub users: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_uri: String,
    pub catalog: CatalogNames,
    pub gameday: GamedayNames,
    pub loguelink: LinkNames,
    pub jwt_secret: String,
    /// Lifetime of issued tokens. `None` issues tokens without an `exp` claim.
    pub jwt_ttl: Option<Duration>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::Missing(name)),
            }
        };

        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_ttl = match lookup("JWT_TTL_SECONDS").filter(|v| !v.trim().is_empty()) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "JWT_TTL_SECONDS",
                        value,
                    });
                }
            },
            None => None,
        };

        Ok(Self {
            db_uri: required("DB_URI")?,
            catalog: CatalogNames {
                database: required("DB_COUNTDOWN")?,
                courses: required("COL_COURSEINFO")?,
                divisions: required("COL_DIVISIONINFO")?,
                minors: required("COL_MINORINFO")?,
            },
            gameday: GamedayNames {
                database: required("DB_GAMEDAY")?,
                games: required("COL_GAMEINFO")?,
                users: required("COL_GAMEUSERS")?,
            },
            loguelink: LinkNames {
                database: required("DB_LOGUELINK")?,
                links: required("COL_LINKINFO")?,
                tutorials: required("COL_TUTORIALINFO")?,
                users: required("COL_LINKUSERS")?,
            },
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl,
            port,
        })
    }
}
