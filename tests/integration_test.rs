use movie_db::db::{count_rows, open_existing};
use movie_db::ingestion::{populate, DataFile, IngestionStatus};
use movie_db::query::MovieQueries;
use movie_db::schema::{initialise, DdlSource};
use movie_db::MovieDbError;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PIRATES: &str = "Pirates of the Caribbean: The Curse of the Black Pearl";

/// Create an initialised database inside `dir`.
fn create_database(dir: &Path) -> Connection {
    let db_path = dir.join("movies.db");
    initialise(&db_path, &DdlSource::Bundled).unwrap();
    open_existing(&db_path).unwrap()
}

/// Write a data directory with the given contents; files not listed are empty.
fn create_data_dir(dir: &Path, contents: &[(DataFile, &str)]) -> PathBuf {
    let data_dir = dir.join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    for file in DataFile::ALL {
        let text = contents
            .iter()
            .find(|(f, _)| *f == file)
            .map(|(_, text)| *text)
            .unwrap_or("");
        std::fs::write(data_dir.join(file.file_name()), text).unwrap();
    }
    data_dir
}

#[test]
fn test_single_actor_cast_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let conn = create_database(temp_dir.path());
    let movie_line = format!(
        "{},Action,143 minutes,Blacksmith Will Turner teams up with eccentric pirate Captain Jack Sparrow.,2003-07-09\n",
        PIRATES
    );
    let link_line = format!("Johnny Depp,{}\n", PIRATES);
    let data_dir = create_data_dir(
        temp_dir.path(),
        &[
            (DataFile::Actors, "Johnny Depp,1963-06-09\n"),
            (DataFile::Movies, movie_line.as_str()),
            (DataFile::ActorsToMovies, link_line.as_str()),
        ],
    );

    let result = populate(&conn, &data_dir).unwrap();
    assert_eq!(result.file(DataFile::Actors).unwrap().inserted, 1);
    assert_eq!(result.file(DataFile::Movies).unwrap().inserted, 1);
    assert_eq!(result.file(DataFile::ActorsToMovies).unwrap().inserted, 1);

    let report = MovieQueries::new(&conn).cast_of(PIRATES).unwrap();
    assert_eq!(report.rows, vec!["Johnny Depp"]);
}

#[test]
fn test_no_rated_award_winners_reports_no_directors() {
    let temp_dir = TempDir::new().unwrap();
    let conn = create_database(temp_dir.path());
    let data_dir = create_data_dir(
        temp_dir.path(),
        &[
            (DataFile::Awards, "Best Actress\n"),
            (
                DataFile::Movies,
                "Chocolat,Drama,121 minutes,A chocolatier arrives.,2000-12-15\n\
                 Sleepy Hollow,Horror,105 minutes,A headless horseman.,1999-11-19\n",
            ),
            (
                DataFile::Directors,
                "Chocolat,Lasse Hallström\nSleepy Hollow,Tim Burton\n",
            ),
            (DataFile::MoviesToAwards, "Chocolat,Best Actress\nSleepy Hollow,No awards\n"),
            (DataFile::Ratings, "6.9,IMDb,Chocolat\n7.3,IMDb,Sleepy Hollow\n"),
        ],
    );

    let result = populate(&conn, &data_dir).unwrap();
    assert_eq!(result.status, IngestionStatus::Success);
    assert_eq!(count_rows(&conn, "movies_to_awards").unwrap(), 1);

    let report = MovieQueries::new(&conn)
        .directors_of_awarded_movies_above(7.0)
        .unwrap();
    assert!(report.rows.is_empty());
    assert_eq!(
        report.to_string(),
        "No directors have directed movies with awards and a rating over 7.0.\n"
    );
}

#[test]
fn test_rating_for_unknown_movie_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let conn = create_database(temp_dir.path());
    let data_dir = create_data_dir(
        temp_dir.path(),
        &[
            (DataFile::Movies, "Chocolat,Drama,121 minutes,A chocolatier arrives.,2000-12-15\n"),
            (DataFile::Directors, "Chocolat,Lasse Hallström\n"),
            (DataFile::Ratings, "7.2,IMDb,Chocolat\n9.9,IMDb,The Room That Never Was\n"),
        ],
    );

    let result = populate(&conn, &data_dir).unwrap();
    let ratings = result.file(DataFile::Ratings).unwrap();
    assert_eq!(ratings.inserted, 1);
    assert_eq!(ratings.skipped, 1);
    assert!(result.foreign_keys_succeeded());

    let orphans: i64 = conn
        .query_row("SELECT COUNT(*) FROM ratings WHERE Movie_ID = 0", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn test_unexpected_file_aborts_before_loading() {
    let temp_dir = TempDir::new().unwrap();
    let conn = create_database(temp_dir.path());
    let data_dir = create_data_dir(
        temp_dir.path(),
        &[(DataFile::Actors, "Johnny Depp,1963-06-09\n")],
    );
    std::fs::write(data_dir.join("notes.txt"), "remember the popcorn\n").unwrap();

    let err = populate(&conn, &data_dir).unwrap_err();
    assert!(matches!(err, MovieDbError::UnexpectedDataFile(name) if name == "notes.txt"));
    assert_eq!(count_rows(&conn, "actors").unwrap(), 0);
}

#[test]
fn test_populate_uninitialised_database() {
    let temp_dir = TempDir::new().unwrap();
    let err = open_existing(temp_dir.path().join("movies.db")).unwrap_err();
    assert!(matches!(err, MovieDbError::DatabaseNotInitialized(_)));
}

#[test]
fn test_bundled_sample_data() {
    let temp_dir = TempDir::new().unwrap();
    let conn = create_database(temp_dir.path());
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");

    let result = populate(&conn, &data_dir).unwrap();
    assert_eq!(result.status, IngestionStatus::Success);
    assert_eq!(result.directors.updated, 4);
    assert_eq!(result.directors.linked, 4);
    assert_eq!(count_rows(&conn, "movies").unwrap(), 4);
    assert_eq!(count_rows(&conn, "actors_to_movies").unwrap(), 9);
    // Two of the four lines carry the "No awards" sentinel
    assert_eq!(count_rows(&conn, "movies_to_awards").unwrap(), 2);
    assert_eq!(count_rows(&conn, "ratings").unwrap(), 5);

    let queries = MovieQueries::new(&conn);

    let mut cast = queries.cast_of(PIRATES).unwrap().rows;
    cast.sort();
    assert_eq!(
        cast,
        vec!["Geoffrey Rush", "Johnny Depp", "Keira Knightley", "Orlando Bloom"]
    );

    let plots = queries.plots_for("Johnny Depp", "Tim Burton").unwrap();
    assert_eq!(plots.rows.len(), 2);

    let mut directors = queries.directors_for_actor("Johnny Depp").unwrap().rows;
    directors.sort();
    assert_eq!(directors, vec!["Gore Verbinski", "Lasse Hallström", "Tim Burton"]);

    let mut actors = queries.award_winning_actors_in_genre("Action").unwrap().rows;
    actors.sort();
    assert_eq!(actors, vec!["Geoffrey Rush", "Johnny Depp"]);

    let mut awarded = queries.directors_of_awarded_movies_above(7.0).unwrap().rows;
    awarded.sort();
    assert_eq!(awarded, vec!["Gore Verbinski", "Lasse Hallström"]);
}

#[test]
fn test_invalid_utf8_line_does_not_stop_the_load() {
    let temp_dir = TempDir::new().unwrap();
    let conn = create_database(temp_dir.path());
    let data_dir = create_data_dir(
        temp_dir.path(),
        &[(DataFile::Movies, "Chocolat,Drama,121 minutes,A chocolatier arrives.,2000-12-15\n")],
    );
    std::fs::write(
        data_dir.join("actors.csv"),
        b"Johnny Depp,1963-06-09\nPen\xe9lope Cruz,1974-04-28\nKeira Knightley,1985-03-26\n",
    )
    .unwrap();

    let result = populate(&conn, &data_dir).unwrap();
    assert_eq!(result.file(DataFile::Actors).unwrap().inserted, 3);
    assert_eq!(result.file(DataFile::Movies).unwrap().inserted, 1);
    assert_eq!(count_rows(&conn, "actors").unwrap(), 3);
    assert_eq!(count_rows(&conn, "movies").unwrap(), 1);
}
