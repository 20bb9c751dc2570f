use chrono::NaiveDate;

/// This is the standard way of stamping a chart artifact with its creation date.
pub fn date_to_artifact_suffix(date: NaiveDate) -> String {
    date.format("%y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::date_to_artifact_suffix;

    #[test]
    fn uses_two_digit_year() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        assert_eq!(date_to_artifact_suffix(date), "24-04-05");
    }
}
