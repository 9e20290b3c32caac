//! The six canned reports
//!
//! All of them are read-only and run on the connection handed to [`MovieQueries`].

use crate::db::lookup::{ACTOR_BY_NAME, DIRECTOR_BY_NAME, MOVIE_BY_TITLE};
use crate::error::Result;
use crate::query::report::Report;
use rusqlite::{Connection, Params};
use tracing::debug;

const LIST_MOVIES: &str = "SELECT Title FROM movies";

const CAST_OF_MOVIE: &str = "SELECT a.Name \
     FROM actors_to_movies atm \
     JOIN actors a ON a.Actor_ID = atm.Actor_ID \
     WHERE atm.Movie_ID = ?1";

const PLOTS_FOR_ACTOR_AND_DIRECTOR: &str = "SELECT m.Plot \
     FROM movies m \
     JOIN actors_to_movies atm ON atm.Movie_ID = m.Movie_ID \
     JOIN directors d ON d.Director_ID = m.Director_ID \
     WHERE atm.Actor_ID = ?1 AND d.Name = ?2";

const DIRECTORS_FOR_ACTOR: &str = "SELECT DISTINCT d.Name \
     FROM movies m \
     JOIN actors_to_movies atm ON atm.Movie_ID = m.Movie_ID \
     JOIN directors d ON d.Director_ID = m.Director_ID \
     JOIN actors a ON a.Actor_ID = atm.Actor_ID \
     WHERE a.Name = ?1";

const AWARD_WINNING_ACTORS_IN_GENRE: &str = "SELECT DISTINCT a.Name \
     FROM actors a \
     JOIN actors_to_awards ata ON ata.Actor_ID = a.Actor_ID \
     JOIN actors_to_movies atm ON atm.Actor_ID = a.Actor_ID \
     JOIN movies m ON m.Movie_ID = atm.Movie_ID \
     WHERE m.Genre = ?1";

const DIRECTORS_OF_AWARDED_MOVIES_ABOVE: &str = "SELECT DISTINCT d.Name \
     FROM directors d \
     JOIN movies m ON m.Title = d.Movie_Title \
     JOIN ratings r ON r.Movie_ID = m.Movie_ID \
     JOIN movies_to_awards mta ON mta.Movie_ID = m.Movie_ID \
     WHERE r.Rating_Value > ?1";

/// Report runner bound to one open database.
pub struct MovieQueries<'conn> {
    conn: &'conn Connection,
}

impl<'conn> MovieQueries<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn strings<P: Params>(&self, sql: &str, params: P) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("{} rows from {:?}", rows.len(), sql);
        Ok(rows)
    }

    /// 1. Every movie title.
    pub fn list_movies(&self) -> Result<Report> {
        let rows = self.strings(LIST_MOVIES, [])?;
        Ok(Report::new("Movies in Database:", "No movies in database").with_rows(rows))
    }

    /// 2. The actors who appear in `movie_title`.
    pub fn cast_of(&self, movie_title: &str) -> Result<Report> {
        let report = Report::new(
            format!("The actors/actresses that acted in {} are:", movie_title),
            format!("No actors were found for \"{}\" in the database", movie_title),
        );

        let Some(movie_id) = MOVIE_BY_TITLE.find(self.conn, movie_title) else {
            return Ok(report);
        };
        let rows = self.strings(CAST_OF_MOVIE, [movie_id])?;
        Ok(report.with_rows(rows))
    }

    /// 3. Plots of movies featuring `actor` and directed by `director`.
    ///
    /// Both names must exist before the plots are looked up; otherwise the report
    /// only says which one is missing.
    pub fn plots_for(&self, actor: &str, director: &str) -> Result<Report> {
        let Some(actor_id) = ACTOR_BY_NAME.find(self.conn, actor) else {
            return Ok(Report::aborted(format!(
                "Actor \"{}\" not found in database",
                actor
            )));
        };
        if DIRECTOR_BY_NAME.find(self.conn, director).is_none() {
            return Ok(Report::aborted(format!(
                "Director \"{}\" not found in database",
                director
            )));
        }

        let rows = self.strings(
            PLOTS_FOR_ACTOR_AND_DIRECTOR,
            rusqlite::params![actor_id, director],
        )?;
        Ok(Report::new(
            format!("Plots of movies with {} directed by {}:", actor, director),
            format!("No movies found with actor {} and director {}", actor, director),
        )
        .with_rows(rows))
    }

    /// 4. Directors of the movies `actor` appears in.
    pub fn directors_for_actor(&self, actor: &str) -> Result<Report> {
        let rows = self.strings(DIRECTORS_FOR_ACTOR, [actor])?;
        Ok(Report::new(
            format!("Directors of movies with {}:", actor),
            format!("No movies found with actor {}", actor),
        )
        .with_rows(rows))
    }

    /// 5. Actors who have won an award and acted in a movie of `genre`.
    pub fn award_winning_actors_in_genre(&self, genre: &str) -> Result<Report> {
        let rows = self.strings(AWARD_WINNING_ACTORS_IN_GENRE, [genre])?;
        Ok(Report::new(
            format!(
                "The actors that have won awards and acted in \"{}\" movies:",
                genre
            ),
            format!(
                "No actors have won awards and acted in \"{}\" movies.",
                genre
            ),
        )
        .with_rows(rows))
    }

    /// 6. Directors of award-winning movies rated strictly above `threshold`.
    pub fn directors_of_awarded_movies_above(&self, threshold: f64) -> Result<Report> {
        let rows = self.strings(DIRECTORS_OF_AWARDED_MOVIES_ABOVE, [threshold])?;
        Ok(Report::new(
            format!(
                "The directors of movies that have won awards and have a rating over {:?} are:",
                threshold
            ),
            format!(
                "No directors have directed movies with awards and a rating over {:?}.",
                threshold
            ),
        )
        .with_rows(rows))
    }
}
