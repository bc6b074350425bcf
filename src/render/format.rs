/// Group digits in threes with commas: `83240525` becomes `83,240,525`
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Comma-separated list, or a dash when empty
pub fn join_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(83_240_525), "83,240,525");
        assert_eq!(format_population(1_402_112_000), "1,402,112,000");
    }

    #[test]
    fn test_join_or_dash() {
        assert_eq!(join_or_dash::<&str>(&[]), "-");
        assert_eq!(join_or_dash(&["Bern", "Geneva"]), "Bern, Geneva");
    }
}
