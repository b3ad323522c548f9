pub mod analyze;
pub mod duplicates;
pub mod find;

use std::io::{self, Read};

use randcheck_tests::RandomnessTester;

/// Install the `env_logger` backend. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Parse integers separated by whitespace and/or commas.
pub fn parse_samples(text: &str) -> io::Result<Vec<i64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i64>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid sample '{token}': {e}"),
                )
            })
        })
        .collect()
}

/// Read samples from `path`, or stdin when the path is absent or "-".
pub fn read_samples(path: Option<&str>) -> io::Result<Vec<i64>> {
    let text = match path {
        Some(p) if p != "-" => std::fs::read_to_string(p)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let samples = parse_samples(&text)?;
    log::info!(
        "read {} samples from {}",
        samples.len(),
        path.filter(|p| *p != "-").unwrap_or("stdin")
    );
    Ok(samples)
}

/// Read the input and build a tester, exiting with status 1 on any error.
pub fn load_tester(input: Option<&str>, min: i64, max: i64) -> RandomnessTester {
    let samples = match read_samples(input) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("Failed to read samples: {e}");
            std::process::exit(1);
        }
    };
    match RandomnessTester::new(&samples, min, max) {
        Ok(tester) => tester,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Serialize `value` as pretty JSON into `path`.
pub fn save_json<T: serde::Serialize>(path: &str, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
}

/// Write `value` as pretty JSON to `path`, exiting with status 1 on failure.
pub fn write_json<T: serde::Serialize>(path: &str, value: &T) {
    if let Err(e) = save_json(path, value) {
        eprintln!("Failed to write results to {path}: {e}");
        std::process::exit(1);
    }
    println!("\nResults saved to: {path}");
}
