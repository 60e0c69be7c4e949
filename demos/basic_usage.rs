//! Basic usage example
//!
//! Registers a plain-text console handler and a JSON-lines handler for
//! different levels, then logs with fields, context and a trace.
//!
//! Run with: cargo run --example basic_usage

use rust_log_dispatch::prelude::*;
use rust_log_dispatch::{fields, global, infof};
use std::sync::Arc;
use std::time::Duration;

struct Text;

impl Handler for Text {
    fn log(&self, entry: &Entry) -> Result<()> {
        println!(
            "{} [{:5}] {} {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.level,
            entry.message,
            entry.fields
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "text"
    }
}

struct JsonLines;

impl Handler for JsonLines {
    fn log(&self, entry: &Entry) -> Result<()> {
        eprintln!("{}", serde_json::to_string(entry)?);
        Ok(())
    }

    fn as_flusher(&self) -> Option<&dyn Flusher> {
        Some(self)
    }

    fn name(&self) -> &str {
        "json"
    }
}

impl Flusher for JsonLines {
    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stderr().flush()?;
        Ok(())
    }
}

fn main() {
    println!("=== Rust Log Dispatch - Basic Usage Example ===\n");

    global::register_handler(Arc::new(Text), &ALL_LEVELS);
    global::register_handler(Arc::new(JsonLines), &[Level::Warn, Level::Error]);
    global::with_default_fields(fields! { "service" => "demo", "pid" => std::process::id() });

    println!("1. Logging at different levels:");
    global::debug("This is a debug message");
    global::info("This is an info message");
    global::warn("This is a warning message (also as JSON on stderr)");
    global::error("This is an error message (also as JSON on stderr)");

    println!("\n2. Fields and templates:");
    let req = global::str("request_id", "r-17").str("method", "GET");
    req.u16("status", 200).info("request served");
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    req.with_error(&err).error("request failed");
    infof!(req, "{} bytes sent", 1024);

    println!("\n3. Context propagation:");
    let ctx = new_context(&Context::background(), req.str("user", "ana"));
    global::from_context(&ctx).info("handled inside a request scope");

    println!("\n4. Tracing:");
    let trace = global::trace("warm cache");
    std::thread::sleep(Duration::from_millis(15));
    trace.stop();

    global::flush();
    println!("\n=== Example completed successfully! ===");
}
