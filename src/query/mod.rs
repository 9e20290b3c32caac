//! Query Service - Fixed menu of read-only reports
//!
//! Reports are selected by number (1-6). Free-text parameters (movie title, actor,
//! director) are asked for interactively; the genre and the rating threshold come
//! from configuration.

pub mod prompt;
pub mod report;
pub mod reports;

pub use prompt::Prompter;
pub use report::Report;
pub use reports::MovieQueries;

use crate::error::{MovieDbError, Result};
use std::io::{BufRead, Write};

const MOVIE_PROMPT: &str = "Enter movie name: ";
const ACTOR_PROMPT: &str = "Enter actor's/actress' name: ";
const DIRECTOR_PROMPT: &str = "Enter director's name: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    ListMovies,
    CastOfMovie,
    PlotsForActorAndDirector,
    DirectorsForActor,
    AwardWinningActorsInGenre,
    DirectorsOfAwardedMovies,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::ListMovies,
        ReportKind::CastOfMovie,
        ReportKind::PlotsForActorAndDirector,
        ReportKind::DirectorsForActor,
        ReportKind::AwardWinningActorsInGenre,
        ReportKind::DirectorsOfAwardedMovies,
    ];

    pub fn number(&self) -> u8 {
        match self {
            ReportKind::ListMovies => 1,
            ReportKind::CastOfMovie => 2,
            ReportKind::PlotsForActorAndDirector => 3,
            ReportKind::DirectorsForActor => 4,
            ReportKind::AwardWinningActorsInGenre => 5,
            ReportKind::DirectorsOfAwardedMovies => 6,
        }
    }

    /// Parse the query number given on the command line.
    pub fn from_number(input: &str) -> Result<Self> {
        let number = input
            .trim()
            .parse::<u8>()
            .map_err(|_| MovieDbError::InvalidQuery(input.to_string()))?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.number() == number)
            .ok_or_else(|| MovieDbError::InvalidQuery(input.to_string()))
    }

    /// Labels of the free-text parameters this report asks for, in order.
    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            ReportKind::CastOfMovie => &[MOVIE_PROMPT],
            ReportKind::PlotsForActorAndDirector => &[ACTOR_PROMPT, DIRECTOR_PROMPT],
            ReportKind::DirectorsForActor => &[ACTOR_PROMPT],
            _ => &[],
        }
    }
}

/// Non-interactive report parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    pub genre: String,
    pub min_rating: f64,
}

/// Ask for whatever `kind` needs and run it.
pub fn run_report<R: BufRead, W: Write>(
    queries: &MovieQueries<'_>,
    kind: ReportKind,
    params: &ReportParams,
    prompter: &mut Prompter<R, W>,
) -> Result<Report> {
    let answers = kind
        .prompts()
        .iter()
        .map(|label| prompter.ask(label))
        .collect::<Result<Vec<_>>>()?;

    match kind {
        ReportKind::ListMovies => queries.list_movies(),
        ReportKind::CastOfMovie => queries.cast_of(&answers[0]),
        ReportKind::PlotsForActorAndDirector => queries.plots_for(&answers[0], &answers[1]),
        ReportKind::DirectorsForActor => queries.directors_for_actor(&answers[0]),
        ReportKind::AwardWinningActorsInGenre => {
            queries.award_winning_actors_in_genre(&params.genre)
        }
        ReportKind::DirectorsOfAwardedMovies => {
            queries.directors_of_awarded_movies_above(params.min_rating)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BUNDLED_DDL;
    use rusqlite::Connection;
    use std::io::Cursor;

    #[test]
    fn test_from_number() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_number(&kind.number().to_string()).unwrap(), kind);
        }
        assert_eq!(ReportKind::from_number(" 3 ").unwrap(), ReportKind::PlotsForActorAndDirector);
        for bad in ["0", "7", "-1", "two", ""] {
            assert!(matches!(
                ReportKind::from_number(bad),
                Err(MovieDbError::InvalidQuery(_))
            ));
        }
    }

    #[test]
    fn test_run_report_prompts_for_parameters() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(BUNDLED_DDL).unwrap();
        conn.execute("INSERT INTO actors (Name) VALUES ('Johnny Depp')", [])
            .unwrap();

        let params = ReportParams {
            genre: "Action".to_string(),
            min_rating: 7.0,
        };
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new("Johnny Depp\nTim Burton\n"), &mut output);

        let report = run_report(
            &MovieQueries::new(&conn),
            ReportKind::PlotsForActorAndDirector,
            &params,
            &mut prompter,
        )
        .unwrap();
        drop(prompter);

        assert_eq!(report.to_string(), "Director \"Tim Burton\" not found in database\n");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter actor's/actress' name: Enter director's name: "
        );
    }

    #[test]
    fn test_run_report_without_prompts() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(BUNDLED_DDL).unwrap();

        let params = ReportParams {
            genre: "Action".to_string(),
            min_rating: 7.0,
        };
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(""), &mut output);

        let report = run_report(
            &MovieQueries::new(&conn),
            ReportKind::AwardWinningActorsInGenre,
            &params,
            &mut prompter,
        )
        .unwrap();
        drop(prompter);

        assert!(report.is_empty());
        assert!(output.is_empty());
    }
}
