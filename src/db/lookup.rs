//! Natural-key lookups
//!
//! CSV rows refer to actors, movies, awards and directors by their text (name or
//! title). A [`KeyLookup`] turns that text into the row's surrogate key with a point
//! query. There is no caching: repeated names are looked up again.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

/// Returned by [`resolve_key`] when nothing matches. Surrogate keys start at 1.
pub const NOT_FOUND: i64 = 0;

/// Which table/column pair maps a natural key to a surrogate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLookup {
    pub table: &'static str,
    pub key_column: &'static str,
    pub lookup_column: &'static str,
}

pub const ACTOR_BY_NAME: KeyLookup = KeyLookup {
    table: "actors",
    key_column: "Actor_ID",
    lookup_column: "Name",
};

pub const MOVIE_BY_TITLE: KeyLookup = KeyLookup {
    table: "movies",
    key_column: "Movie_ID",
    lookup_column: "Title",
};

pub const AWARD_BY_NAME: KeyLookup = KeyLookup {
    table: "awards",
    key_column: "Award_ID",
    lookup_column: "Award_Name",
};

pub const DIRECTOR_BY_NAME: KeyLookup = KeyLookup {
    table: "directors",
    key_column: "Director_ID",
    lookup_column: "Name",
};

impl KeyLookup {
    fn sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = ?1 LIMIT 1",
            self.key_column, self.table, self.lookup_column
        )
    }

    /// Key of the first row whose lookup column equals `value` exactly.
    ///
    /// Query failures are logged and treated as a miss.
    pub fn find(&self, conn: &Connection, value: &str) -> Option<i64> {
        let result = conn
            .query_row(&self.sql(), params![value], |row| row.get::<_, i64>(0))
            .optional();

        match result {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    "Lookup of {:?} in {}.{} failed: {}",
                    value, self.table, self.lookup_column, e
                );
                None
            }
        }
    }
}

/// Resolve `value` through `lookup`, returning [`NOT_FOUND`] on a miss.
pub fn resolve_key(conn: &Connection, lookup: &KeyLookup, value: &str) -> i64 {
    lookup.find(conn, value).unwrap_or(NOT_FOUND)
}
