use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::loader::{LoadReport, process_dir};
use crate::core::log_file::LogFileTransformer;
use crate::core::song_file::SongFileTransformer;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::colors::{CYAN, RESET, color_for_count, color_for_failures};
use crate::utils::path::expand_tilde;

/// Run the full ETL: the catalog directory first, so the lookup join has a
/// populated catalog, then the play-log directory.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Load {
        songs,
        logs,
        strict,
    } = cmd
    {
        let song_root = expand_tilde(songs.as_deref().unwrap_or(&cfg.song_data));
        let log_root = expand_tilde(logs.as_deref().unwrap_or(&cfg.log_data));

        let mut pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        let song_report = process_dir(&mut pool.conn, &song_root, &SongFileTransformer, *strict)?;

        let transformer = LogFileTransformer::new(&cfg.play_action);
        let log_report = process_dir(&mut pool.conn, &log_root, &transformer, *strict)?;

        print_summary("catalog", &song_report);
        print_summary("logs", &log_report);

        if song_report.failed() + log_report.failed() == 0 {
            messages::success("Load completed.");
        } else {
            messages::warning(format!(
                "Load completed with {} failed file(s).",
                song_report.failed() + log_report.failed()
            ));
        }
    }

    Ok(())
}

fn print_summary(label: &str, report: &LoadReport) {
    println!(
        "{}{:<8}{} {} found, {}{} loaded{}, {}{} malformed{}, {}{} store error(s){}",
        CYAN,
        label,
        RESET,
        report.found,
        color_for_count(report.loaded),
        report.loaded,
        RESET,
        color_for_failures(report.malformed),
        report.malformed,
        RESET,
        color_for_failures(report.store_errors),
        report.store_errors,
        RESET,
    );
}
