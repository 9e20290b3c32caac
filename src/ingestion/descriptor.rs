//! Ingestion descriptors
//!
//! Each file name the data directory may contain maps to exactly one descriptor that
//! says which table it fills and how its fields are bound.

use crate::db::lookup::{KeyLookup, ACTOR_BY_NAME, AWARD_BY_NAME, MOVIE_BY_TITLE};

/// Award value in `movies_to_awards.csv` meaning the movie won nothing.
pub const NO_AWARDS: &str = "No awards";

/// A plain entity file: one row per line, leading fields bound in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub table: &'static str,
    /// Columns bound from the first fields of each line; the key is auto-assigned
    pub columns: &'static [&'static str],
}

impl EntityDescriptor {
    /// Index of the last field bound into the insert statement.
    pub fn last_index(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders
        )
    }
}

/// An association file: two natural keys per line, linked through a junction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDescriptor {
    pub table: &'static str,
    pub left: KeyLookup,
    pub right: KeyLookup,
    /// Right-hand value that marks a line as carrying nothing to link
    pub skip_value: Option<&'static str>,
}

impl LinkDescriptor {
    pub fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
            self.table, self.left.key_column, self.right.key_column
        )
    }

    pub fn is_skip_value(&self, value: &str) -> bool {
        self.skip_value == Some(value)
    }
}

pub const ACTORS: EntityDescriptor = EntityDescriptor {
    table: "actors",
    columns: &["Name", "Birth_Date"],
};

pub const AWARDS: EntityDescriptor = EntityDescriptor {
    table: "awards",
    columns: &["Award_Name"],
};

pub const DIRECTORS: EntityDescriptor = EntityDescriptor {
    table: "directors",
    columns: &["Movie_Title", "Name"],
};

pub const MOVIES: EntityDescriptor = EntityDescriptor {
    table: "movies",
    columns: &["Title", "Genre", "Runtime", "Plot", "Release_Date"],
};

pub const ACTORS_TO_MOVIES: LinkDescriptor = LinkDescriptor {
    table: "actors_to_movies",
    left: ACTOR_BY_NAME,
    right: MOVIE_BY_TITLE,
    skip_value: None,
};

pub const MOVIES_TO_AWARDS: LinkDescriptor = LinkDescriptor {
    table: "movies_to_awards",
    left: MOVIE_BY_TITLE,
    right: AWARD_BY_NAME,
    skip_value: Some(NO_AWARDS),
};

pub const ACTORS_TO_AWARDS: LinkDescriptor = LinkDescriptor {
    table: "actors_to_awards",
    left: ACTOR_BY_NAME,
    right: AWARD_BY_NAME,
    skip_value: None,
};

/// How a data file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Entity(EntityDescriptor),
    Link(LinkDescriptor),
    Ratings,
}

/// Every file the data directory is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataFile {
    Actors,
    Awards,
    Directors,
    Movies,
    ActorsToMovies,
    MoviesToAwards,
    ActorsToAwards,
    Ratings,
}

impl DataFile {
    /// All files, in load order: entities, associations, then ratings.
    pub const ALL: [DataFile; 8] = [
        DataFile::Actors,
        DataFile::Awards,
        DataFile::Directors,
        DataFile::Movies,
        DataFile::ActorsToMovies,
        DataFile::MoviesToAwards,
        DataFile::ActorsToAwards,
        DataFile::Ratings,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            DataFile::Actors => "actors.csv",
            DataFile::Awards => "awards.csv",
            DataFile::Directors => "directors.csv",
            DataFile::Movies => "movies.csv",
            DataFile::ActorsToMovies => "actors_to_movies.csv",
            DataFile::MoviesToAwards => "movies_to_awards.csv",
            DataFile::ActorsToAwards => "actors_to_awards.csv",
            DataFile::Ratings => "ratings.csv",
        }
    }

    pub fn from_file_name(name: &str) -> Option<DataFile> {
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }

    pub fn role(&self) -> FileRole {
        match self {
            DataFile::Actors => FileRole::Entity(ACTORS),
            DataFile::Awards => FileRole::Entity(AWARDS),
            DataFile::Directors => FileRole::Entity(DIRECTORS),
            DataFile::Movies => FileRole::Entity(MOVIES),
            DataFile::ActorsToMovies => FileRole::Link(ACTORS_TO_MOVIES),
            DataFile::MoviesToAwards => FileRole::Link(MOVIES_TO_AWARDS),
            DataFile::ActorsToAwards => FileRole::Link(ACTORS_TO_AWARDS),
            DataFile::Ratings => FileRole::Ratings,
        }
    }
}
