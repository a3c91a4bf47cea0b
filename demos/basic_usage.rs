//! Basic logger usage example
//!
//! Demonstrates console echo, the verbose/debug gates and the session report.
//!
//! Run with: cargo run --example basic_usage

use runlog::prelude::*;
use runlog::{info, separator, warning};

fn main() -> Result<()> {
    println!("=== runlog - Basic Usage Example ===\n");

    // Console-only logger with the verbose gate open
    let logger = Logger::builder().verbose(true).build();

    println!("1. Logging with different kinds:");
    separator!(logger, "Start");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.success("This is a success message");
    logger.verbose("This is a verbose message");
    logger.debug("Debug gate is closed, so this is dropped");
    logger.empty_line();

    println!("\n2. Formatting macros:");
    let files = 42;
    info!(logger, "Processed {} files", files);
    warning!(logger, "{} files were skipped", 3);

    println!("\n3. Logging a result:");
    let parsed: std::result::Result<u16, String> = "8080".parse::<u16>().map_err(|e| e.to_string());
    logger.write_ret_val(&parsed);

    println!("\n4. Session report without verbose records:");
    print!("{}", logger.running_log(false, false));

    let metrics = logger.metrics();
    println!(
        "\nEnqueued: {}, filtered: {}, flushes: {}",
        metrics.enqueued_count(),
        metrics.filtered_count(),
        metrics.total_flushes()
    );

    logger.dispose()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
