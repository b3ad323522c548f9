use std::collections::BTreeMap;

pub fn run(input: Option<&str>, min: i64, max: i64, output_path: Option<&str>) {
    let tester = super::load_tester(input, min, max);
    let dups = tester.duplicate_positions();

    if dups.is_empty() {
        println!("No repeated values in {} samples.", tester.len());
    } else {
        print!("{}", render(&dups));
        println!(
            "\n{} of {} samples belong to {} repeated value(s).",
            dups.values().map(Vec::len).sum::<usize>(),
            tester.len(),
            dups.len()
        );
    }

    if let Some(path) = output_path {
        super::write_json(path, &dups);
    }
}

/// One line per repeated value, most frequent first.
fn render(dups: &BTreeMap<i64, Vec<usize>>) -> String {
    let mut rows: Vec<(&i64, &Vec<usize>)> = dups.iter().collect();
    rows.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));

    let mut out = format!("{:>12} {:>6}  Positions\n", "Value", "Count");
    for (value, positions) in rows {
        let shown: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
        out.push_str(&format!(
            "{:>12} {:>6}  {}\n",
            value,
            positions.len(),
            shown.join(", ")
        ));
    }
    out
}
