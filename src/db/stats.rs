use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const TABLES: [&str; 5] = ["songs", "artists", "users", "time", "songplays"];

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    println!("{}• Rows:{}", CYAN, RESET);
    for table in TABLES {
        let count: i64 = pool.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        println!("    {:<10} {}{}{}", table, GREEN, count, RESET);
    }

    //
    // 3) LOOKUP MATCH RATE
    //
    let plays: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM songplays", [], |row| row.get(0))?;
    if plays > 0 {
        let matched: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM songplays WHERE song_id IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        let pct = matched as f64 / plays as f64 * 100.0;
        println!(
            "{}• Catalog matches:{} {}/{} ({:.1}%)",
            CYAN, RESET, matched, plays, pct
        );
    }

    //
    // 4) TIME RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_time) FROM time", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(start_time) FROM time", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Play range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
