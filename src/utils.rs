use chrono::NaiveDateTime;

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn format_time_str_is_iso_utc() {
        let time = NaiveDate::from_ymd(2024, 6, 1).and_hms(9, 30, 0);
        assert_eq!(format_time_str(&time), "2024-06-01T09:30:00+00:00");
    }
}
