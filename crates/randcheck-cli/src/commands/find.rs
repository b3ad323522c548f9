use randcheck_tests::RandomnessError;

pub fn run(pattern: &str, input: Option<&str>, min: i64, max: i64) {
    let query = match super::parse_samples(pattern) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("Invalid pattern: {e}");
            std::process::exit(1);
        }
    };
    let tester = super::load_tester(input, min, max);

    match tester.find_pattern(&query) {
        Ok(found) => println!("{}", describe(&query, found)),
        Err(RandomnessError::InvalidArgument(msg)) => {
            eprintln!("Invalid pattern: {msg}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn describe(query: &[i64], found: Option<usize>) -> String {
    let shown: Vec<String> = query.iter().map(|v| v.to_string()).collect();
    match found {
        Some(index) => format!("[{}] first found at index {index}", shown.join(", ")),
        None => format!("[{}] not found", shown.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_found() {
        assert_eq!(describe(&[1, 2, 3], Some(1)), "[1, 2, 3] first found at index 1");
    }

    #[test]
    fn test_describe_not_found() {
        assert_eq!(describe(&[9, 9], None), "[9, 9] not found");
    }
}
