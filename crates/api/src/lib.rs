pub mod config;
pub mod cors;
pub mod db;
pub mod graphql;
