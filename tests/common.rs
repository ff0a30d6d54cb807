#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::json;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pm() -> Command {
    cargo_bin_cmd!("playmart")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_playmart.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a fresh fixture directory inside the system temp dir
pub fn setup_data_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_playmart_data", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create fixture dir");
    path
}

/// One catalog file: a single JSON object describing a song and its artist
pub fn write_song_file(
    dir: &std::path::Path,
    file: &str,
    song_id: &str,
    title: &str,
    artist_id: &str,
    artist_name: &str,
    duration: f64,
) {
    let record = json!({
        "num_songs": 1,
        "song_id": song_id,
        "title": title,
        "artist_id": artist_id,
        "artist_name": artist_name,
        "artist_location": "San Francisco, CA",
        "artist_latitude": 37.77,
        "artist_longitude": -122.42,
        "year": 2004,
        "duration": duration,
    });
    fs::write(dir.join(file), record.to_string()).expect("write song file");
}

/// One play-log line in the shape the log exports use
pub fn play_line(
    ts: i64,
    user_id: &str,
    level: &str,
    song: &str,
    artist: &str,
    length: f64,
) -> String {
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Ryan",
        "gender": "M",
        "itemInSession": 0,
        "lastName": "Smith",
        "length": length,
        "level": level,
        "location": "San Jose-Sunnyvale-Santa Clara, CA",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1541016707796.0_f64,
        "sessionId": 583,
        "song": song,
        "status": 200,
        "ts": ts,
        "userId": user_id,
        "userAgent": "\"Mozilla/5.0\"",
    })
    .to_string()
}

/// A non-play action row: most columns are null, as in the real logs
pub fn non_play_line(page: &str, ts: i64) -> String {
    json!({
        "artist": null,
        "auth": "Logged Out",
        "firstName": null,
        "gender": null,
        "itemInSession": 0,
        "lastName": null,
        "length": null,
        "level": "free",
        "location": null,
        "method": "GET",
        "page": page,
        "registration": null,
        "sessionId": 584,
        "song": null,
        "status": 200,
        "ts": ts,
        "userId": "",
        "userAgent": null,
    })
    .to_string()
}

pub fn write_log_file(dir: &std::path::Path, file: &str, lines: &[String]) {
    fs::write(dir.join(file), lines.join("\n")).expect("write log file");
}

/// Open the test DB read-only for assertions
pub fn open_db(db_path: &str) -> rusqlite::Connection {
    rusqlite::Connection::open(db_path).expect("open db")
}

pub fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .expect("count")
}
