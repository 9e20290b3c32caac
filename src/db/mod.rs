//! Database module for the SQLite movies database
//!
//! Connection handling and natural-key lookups shared by ingestion and queries.

pub mod connection;
pub mod lookup;

pub use connection::{count_rows, open_existing};
pub use lookup::{
    resolve_key, KeyLookup, ACTOR_BY_NAME, AWARD_BY_NAME, DIRECTOR_BY_NAME, MOVIE_BY_TITLE,
    NOT_FOUND,
};
