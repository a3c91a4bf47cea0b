//! File logging example
//!
//! Writes a plain-text session log and a JSON history into a temporary
//! directory, then prints both.
//!
//! Run with: cargo run --example file_logging

use runlog::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== runlog - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("runlog-demo");
    std::fs::create_dir_all(&dir)?;

    // Plain text, flushed every 3 records
    let text_logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(&dir, "session.txt")
        .append_to_day_file(false)
        .queue_size_threshold(3)
        .max_queue_age(Duration::from_secs(5))
        .build();

    text_logger.separator("Nightly import");
    for i in 1..=5 {
        text_logger.info(format!("Imported batch {}", i));
    }
    println!("Pending after five writes: {}", text_logger.pending_count());
    text_logger.dispose()?;

    println!("--- {} ---", dir.join("session.txt").display());
    print!("{}", std::fs::read_to_string(dir.join("session.txt"))?);

    // JSON history, one document per flush
    let json_logger = Logger::builder()
        .copy_to_console(false)
        .log_to_file(&dir, "session.json")
        .use_json(true)
        .append_to_day_file(false)
        .build();

    json_logger.warning("Disk usage at 85%");
    json_logger.error("Upload failed");
    json_logger.flush_log()?;

    println!("\n--- {} ---", dir.join("session.json").display());
    print!("{}", std::fs::read_to_string(dir.join("session.json"))?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
