//! Basic usage example for the rsapl library.
//!
//! This example demonstrates how to compile Apache `LogFormat` strings, parse
//! access log lines with them, and load formats from an Apache configuration.
//!
//! Run with `RUST_LOG=rsapl=debug` to see what the library logs.

use rsapl::{compile, CompiledFormat, Error, Mode, ParsedLine};
use std::io::Cursor;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== rsapl Basic Usage Example ===\n");

    // Example 1: Named parsing with a custom format
    named_parsing_example()?;

    // Example 2: Apache configuration parsing
    apache_config_example()?;

    // Example 3: Processing multiple log lines
    multiple_lines_example()?;

    // Example 4: Error handling
    error_handling_example()?;

    Ok(())
}

/// Example 1: Parse a line into named fields
fn named_parsing_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Named Parsing");
    println!("----------------");

    let log_line = r#"127.0.0.1 - - [08/Nov/2013:13:39:18 +0000] "www.example.com" "GET /api/users/123 HTTP/1.1" 200 612 "-" "curl/7.64.1""#;
    let format = r#"%h %l %u %t "%{Host}i" "%r" %>s %b "%{Referer}i" "%{User-Agent}i""#;

    println!("Log line: {}", log_line);
    println!("Format:   {}", format);
    println!();

    let compiled = compile(format)?;
    let entry = compiled.parse_named(log_line)?;

    println!("Parsed fields:");
    for name in compiled.field_names() {
        println!("  {:<28} {}", name, entry.field(name)?);
    }
    println!("  Status as int: {}", entry.int_field("status")?);

    println!("\n");
    Ok(())
}

/// Example 2: Load a format from an Apache configuration
fn apache_config_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Apache Configuration Parsing");
    println!("-------------------------------");

    let apache_config = r#"
    <IfModule log_config_module>
        LogFormat "%h %l %u %t \"%r\" %>s %b \"%{Referer}i\" \"%{User-Agent}i\"" combined
        LogFormat "%v:%p %h %t \"%r\" %>s %D" timed
        CustomLog "logs/access_log" timed
    </IfModule>
    "#;

    let log_line = r#"www.example.com:443 192.168.1.100 [09/Nov/2013:14:22:33 +0000] "POST /api/login HTTP/1.1" 201 1834"#;

    let compiled = CompiledFormat::from_apache_config(Cursor::new(apache_config), "timed")?;
    println!("'timed' format: {}", compiled.format());
    println!("Log line:       {}", log_line);
    println!();

    let entry = compiled.parse_named(log_line)?;
    println!("  Server Name:    {}", entry.field("serverName")?);
    println!("  Port:           {}", entry.int_field("canonicalPort")?);
    println!("  Remote Host:    {}", entry.field("remoteHostname")?);
    println!("  Request:        {}", entry.field("firstRequestLine")?);
    println!("  Status:         {}", entry.int_field("status")?);
    println!("  Time (usec):    {}", entry.int64_field("responseTime")?);

    println!("\n");
    Ok(())
}

/// Example 3: Compile once, parse many lines
fn multiple_lines_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("3. Processing Multiple Log Lines");
    println!("--------------------------------");

    let log_data = r#"127.0.0.1 - - [08/Nov/2013:13:39:18 +0000] "GET /api/users HTTP/1.1" 200 1024
192.168.1.1 - - [08/Nov/2013:13:40:22 +0000] "POST /api/users HTTP/1.1" 201 256
10.0.0.1 - - [08/Nov/2013:13:41:15 +0000] "GET /api/users/123 HTTP/1.1" 200 512
172.16.0.1 - - [08/Nov/2013:13:42:33 +0000] "DELETE /api/users/456 HTTP/1.1" 404 -"#;

    let compiled = CompiledFormat::new(rsapl::apache::COMMON)?;

    let mut total_bytes = 0u64;
    let mut status_counts = std::collections::BTreeMap::new();

    for (i, line) in log_data.lines().enumerate() {
        let values = match compiled.parse(line, Mode::Positional)? {
            ParsedLine::Positional(values) => values,
            ParsedLine::Named(_) => unreachable!("positional mode"),
        };

        // responseSize is `-` when nothing was sent
        total_bytes += values[6].parse::<u64>().unwrap_or(0);
        *status_counts.entry(values[5].clone()).or_insert(0) += 1;

        println!("Line {}: {} {} -> {}", i + 1, values[0], values[4], values[5]);
    }

    println!();
    println!("Statistics:");
    println!("  Total bytes:   {}", total_bytes);
    println!("  Status codes:");
    for (status, count) in status_counts {
        println!("    {}: {} times", status, count);
    }

    println!("\n");
    Ok(())
}

/// Example 4: Error handling scenarios
fn error_handling_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("4. Error Handling");
    println!("-----------------");

    println!("4a. Unknown directive:");
    match compile("%h %Z") {
        Ok(_) => println!("  Unexpected success"),
        Err(e) => println!("  Error: {}", e),
    }

    println!("\n4b. Line doesn't match format:");
    let compiled = compile("%h %>s %b")?;
    match compiled.parse_positional("This is not a valid log line") {
        Ok(_) => println!("  Unexpected success"),
        Err(e @ Error::UnparsableLine { .. }) => println!("  Error: {} (skipping line)", e),
        Err(e) => return Err(e.into()),
    }

    println!("\n4c. Type conversion error:");
    let entry = compiled.parse_named("127.0.0.1 200 -")?;
    match entry.int_field("responseSize") {
        Ok(_) => println!("  Unexpected success"),
        Err(e) => println!("  Error: {}", e),
    }

    println!("\n");
    Ok(())
}
