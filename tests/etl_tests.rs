//! End-to-end CLI tests: run `playmart load` against fixture directories and
//! assert on the resulting star schema.

use predicates::str::contains;

mod common;
use common::{
    count, non_play_line, open_db, play_line, pm, setup_data_dir, setup_test_db, write_log_file,
    write_song_file,
};

const TS_A: i64 = 1542241826796; // 2018-11-15T00:30:26.796Z
const TS_B: i64 = 1542242481796; // same day, ~11 minutes later

#[test]
fn test_load_catalog_and_logs() {
    let db_path = setup_test_db("load_full");
    let song_dir = setup_data_dir("load_full_songs");
    let log_dir = setup_data_dir("load_full_logs");

    write_song_file(
        &song_dir,
        "tr01.json",
        "SOAAA001",
        "Sehr kosmisch",
        "ARAAA001",
        "Harmonia",
        655.77751,
    );

    // 3 records: 2 plays (one matching the catalog, one not) and 1 Login
    write_log_file(
        &log_dir,
        "2018-11-15-events.json",
        &[
            play_line(TS_A, "26", "free", "Sehr kosmisch", "Harmonia", 655.77751),
            non_play_line("Login", TS_A + 100),
            play_line(TS_B, "27", "paid", "Song A", "Artist X", 210.5),
        ],
    );

    pm().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("1 catalog files found"))
    .stdout(contains("1 log files found"))
    .stdout(contains("Load completed."));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "songs"), 1);
    assert_eq!(count(&conn, "artists"), 1);
    assert_eq!(count(&conn, "songplays"), 2); // Login row produced no fact
    assert_eq!(count(&conn, "time"), 2);
    assert_eq!(count(&conn, "users"), 2);

    // matched play carries the surrogate pair
    let (song_id, artist_id): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT song_id, artist_id FROM songplays WHERE user_id = '26'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("matched row");
    assert_eq!(song_id.as_deref(), Some("SOAAA001"));
    assert_eq!(artist_id.as_deref(), Some("ARAAA001"));

    // unmatched play still loaded, with both keys null together
    let (song_id, artist_id): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT song_id, artist_id FROM songplays WHERE user_id = '27'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("unmatched row");
    assert_eq!(song_id, None);
    assert_eq!(artist_id, None);

    // every fact has its time dimension row from the same pass
    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM songplays sp
             LEFT JOIN time t ON t.start_time = sp.start_time
             WHERE t.start_time IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);

    // play_id is the line position inside the source file
    let play_id: i64 = conn
        .query_row(
            "SELECT play_id FROM songplays WHERE user_id = '27'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(play_id, 2);
}

#[test]
fn test_malformed_catalog_file_is_skipped_and_batch_continues() {
    let db_path = setup_test_db("malformed_catalog");
    let song_dir = setup_data_dir("malformed_catalog_songs");
    let log_dir = setup_data_dir("malformed_catalog_logs");

    // "a_" sorts first, so the malformed file is hit before the good one
    std::fs::write(
        song_dir.join("a_broken.json"),
        // duration missing: the whole file must fail with no partial rows
        r#"{"song_id":"SOBAD001","title":"No Duration","artist_id":"ARBAD001","artist_name":"Broken","artist_location":null,"artist_latitude":null,"artist_longitude":null,"year":2001}"#,
    )
    .unwrap();
    write_song_file(
        &song_dir,
        "b_good.json",
        "SOGOOD01",
        "Fine Song",
        "ARGOOD01",
        "Fine Artist",
        180.0,
    );

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("skipped"))
    .stdout(contains("a_broken.json"))
    .stdout(contains("1 failed file(s)"));

    let conn = open_db(&db_path);
    // the good file loaded, the bad one left nothing behind
    assert_eq!(count(&conn, "songs"), 1);
    assert_eq!(count(&conn, "artists"), 1);
    let bad: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM songs WHERE song_id = 'SOBAD001'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(bad, 0);
}

#[test]
fn test_strict_mode_aborts_on_first_failed_file() {
    let db_path = setup_test_db("strict_abort");
    let song_dir = setup_data_dir("strict_abort_songs");
    let log_dir = setup_data_dir("strict_abort_logs");

    std::fs::write(song_dir.join("a_broken.json"), "not json at all").unwrap();
    write_song_file(
        &song_dir,
        "b_good.json",
        "SOGOOD01",
        "Fine Song",
        "ARGOOD01",
        "Fine Artist",
        180.0,
    );

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--strict",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(contains("Malformed record"));

    // the abort happened before the good file was reached
    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "songs"), 0);
}

#[test]
fn test_level_change_across_files_is_last_write_wins() {
    let db_path = setup_test_db("level_change");
    let song_dir = setup_data_dir("level_change_songs");
    let log_dir = setup_data_dir("level_change_logs");

    // files are processed in sorted order: 01 before 02
    write_log_file(
        &log_dir,
        "01-events.json",
        &[play_line(TS_A, "26", "free", "Song A", "Artist X", 210.5)],
    );
    write_log_file(
        &log_dir,
        "02-events.json",
        &[play_line(TS_B, "26", "paid", "Song A", "Artist X", 210.5)],
    );

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success();

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "users"), 1);
    let level: String = conn
        .query_row("SELECT level FROM users WHERE user_id = '26'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(level, "paid");

    // both fact rows survive; re-runs and duplicates are the store's problem
    assert_eq!(count(&conn, "songplays"), 2);
}

#[test]
fn test_empty_data_dirs_load_cleanly() {
    let db_path = setup_test_db("empty_dirs");
    let song_dir = setup_data_dir("empty_dirs_songs");
    let log_dir = setup_data_dir("empty_dirs_logs");

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("0 catalog files found"))
    .stdout(contains("0 log files found"))
    .stdout(contains("Load completed."));
}

#[test]
fn test_nested_directories_are_walked() {
    let db_path = setup_test_db("nested_dirs");
    let song_dir = setup_data_dir("nested_dirs_songs");
    let log_dir = setup_data_dir("nested_dirs_logs");

    let nested = song_dir.join("A").join("B");
    std::fs::create_dir_all(&nested).unwrap();
    write_song_file(
        &nested,
        "tr01.json",
        "SONEST01",
        "Deep Song",
        "ARNEST01",
        "Deep Artist",
        120.0,
    );
    // non-json files are ignored
    std::fs::write(song_dir.join("README.txt"), "not data").unwrap();

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("1 catalog files found"))
    .stdout(contains("1/1 files processed."));

    let conn = open_db(&db_path);
    assert_eq!(count(&conn, "songs"), 1);
}

#[test]
fn test_rerun_is_idempotent_for_dimensions() {
    let db_path = setup_test_db("rerun");
    let song_dir = setup_data_dir("rerun_songs");
    let log_dir = setup_data_dir("rerun_logs");

    write_song_file(
        &song_dir,
        "tr01.json",
        "SOAAA001",
        "Sehr kosmisch",
        "ARAAA001",
        "Harmonia",
        655.77751,
    );
    write_log_file(
        &log_dir,
        "events.json",
        &[play_line(TS_A, "26", "free", "Sehr kosmisch", "Harmonia", 655.77751)],
    );

    for _ in 0..2 {
        pm().args([
            "--db",
            &db_path,
            "--test",
            "load",
            "--songs",
            song_dir.to_str().unwrap(),
            "--logs",
            log_dir.to_str().unwrap(),
        ])
        .assert()
        .success();
    }

    let conn = open_db(&db_path);
    // dimensions collapse on re-run, facts accumulate (plain inserts)
    assert_eq!(count(&conn, "songs"), 1);
    assert_eq!(count(&conn, "artists"), 1);
    assert_eq!(count(&conn, "users"), 1);
    assert_eq!(count(&conn, "time"), 1);
    assert_eq!(count(&conn, "songplays"), 2);
}

#[test]
fn test_db_info_reports_row_counts() {
    let db_path = setup_test_db("db_info");
    let song_dir = setup_data_dir("db_info_songs");
    let log_dir = setup_data_dir("db_info_logs");

    write_song_file(
        &song_dir,
        "tr01.json",
        "SOAAA001",
        "Sehr kosmisch",
        "ARAAA001",
        "Harmonia",
        655.77751,
    );
    write_log_file(
        &log_dir,
        "events.json",
        &[play_line(TS_A, "26", "free", "Sehr kosmisch", "Harmonia", 655.77751)],
    );

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success();

    pm().args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("songplays"))
        .stdout(contains("Catalog matches"))
        .stdout(contains("100.0%"));
}

#[test]
fn test_malformed_log_line_fails_only_that_file() {
    let db_path = setup_test_db("malformed_log");
    let song_dir = setup_data_dir("malformed_log_songs");
    let log_dir = setup_data_dir("malformed_log_logs");

    write_log_file(
        &log_dir,
        "01-events.json",
        &[
            play_line(TS_A, "26", "free", "Song A", "Artist X", 210.5),
            "{ this is not valid json".to_string(),
        ],
    );
    write_log_file(
        &log_dir,
        "02-events.json",
        &[play_line(TS_B, "27", "paid", "Song B", "Artist Y", 199.0)],
    );

    pm().args([
        "--db",
        &db_path,
        "--test",
        "load",
        "--songs",
        song_dir.to_str().unwrap(),
        "--logs",
        log_dir.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(contains("01-events.json:2"))
    .stdout(contains("skipped"));

    let conn = open_db(&db_path);
    // the broken file rolled back entirely, including its valid first line
    assert_eq!(count(&conn, "songplays"), 1);
    let user: String = conn
        .query_row("SELECT user_id FROM songplays", [], |r| r.get(0))
        .unwrap();
    assert_eq!(user, "27");
}
