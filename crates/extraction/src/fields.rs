use chrono::{Duration, NaiveDate};
use sheet_source::Cell;

/// Lenient numeric parse for currency cells ("R$ 150,50", "50", native 150.5).
///
/// Text goes through the legacy normalization: strip everything outside
/// `[0-9,.-]`, then swap the FIRST comma for a period. Only the first comma
/// is replaced, so thousands-separated input like "1.234,56" does not survive
/// the final parse and degrades to 0.0 like any other unparseable value.
pub fn parse_number(cell: &Cell) -> f64 {
    if let Cell::Number(n) = cell {
        return *n;
    }
    let raw = match cell {
        Cell::Empty => "0".to_string(),
        other => other.display(),
    };
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    cleaned.replacen(',', ".", 1).parse().unwrap_or(0.0)
}

/// Parses a DD/MM/YYYY (or DD-MM-YYYY) cell into a date. Native date cells
/// pass straight through.
///
/// Month must land in 1..=12 and day in 1..=31 with no per-month check; an
/// overflowing day rolls into the next month, which is how the upstream
/// spreadsheet evaluated these cells.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    if let Cell::Date(d) = cell {
        return Some(*d);
    }
    if cell.is_empty() {
        return None;
    }
    let raw = cell.display();
    let parts: Vec<&str> = raw.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }
    let day: i64 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;
    if year <= 1900 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::days(day - 1))
}

/// Renders a date cell as zero-padded DD/MM/YYYY. Text passes through with
/// anything after the first space stripped (a time-of-day suffix, usually).
pub fn format_date(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Date(d) => d.format("%d/%m/%Y").to_string(),
        other => {
            let raw = other.display();
            raw.split(' ').next().unwrap_or("").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn parse_number_handles_brazilian_decimals() {
        assert_eq!(parse_number(&text("150,50")), 150.5);
        assert_eq!(parse_number(&text("R$ 150,50")), 150.5);
        assert_eq!(parse_number(&text("-5,5")), -5.5);
        assert_eq!(parse_number(&text("50")), 50.0);
    }

    #[test]
    fn parse_number_passes_native_numbers_through() {
        assert_eq!(parse_number(&Cell::Number(150.5)), 150.5);
        assert_eq!(parse_number(&Cell::Number(0.0)), 0.0);
    }

    #[test]
    fn parse_number_degrades_to_zero() {
        assert_eq!(parse_number(&Cell::Empty), 0.0);
        assert_eq!(parse_number(&text("")), 0.0);
        assert_eq!(parse_number(&text("n/a")), 0.0);
        // Thousands separator: "1.234,56" becomes "1.234.56" after the single
        // comma replace and fails the parse.
        assert_eq!(parse_number(&text("1.234,56")), 0.0);
    }

    #[test]
    fn parse_date_reads_day_month_year() {
        assert_eq!(
            parse_date(&text("31/12/2099")),
            NaiveDate::from_ymd_opt(2099, 12, 31)
        );
        assert_eq!(
            parse_date(&text("01-01-2020")),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(
            parse_date(&text("5/7/2024")),
            NaiveDate::from_ymd_opt(2024, 7, 5)
        );
    }

    #[test]
    fn parse_date_rolls_over_out_of_range_days() {
        // Day 31 of a 30-day month lands on the 1st of the next month.
        assert_eq!(
            parse_date(&text("31/04/2024")),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(
            parse_date(&text("30/02/2023")),
            NaiveDate::from_ymd_opt(2023, 3, 2)
        );
    }

    #[test]
    fn parse_date_rejects_out_of_range_parts() {
        assert_eq!(parse_date(&text("01/13/2024")), None);
        assert_eq!(parse_date(&text("00/05/2024")), None);
        assert_eq!(parse_date(&text("32/05/2024")), None);
        assert_eq!(parse_date(&text("01/01/1900")), None);
        assert_eq!(parse_date(&text("2024")), None);
        assert_eq!(parse_date(&Cell::Empty), None);
    }

    #[test]
    fn parse_date_passes_native_dates_through() {
        let d = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        assert_eq!(parse_date(&Cell::Date(d)), Some(d));
    }

    #[test]
    fn format_date_pads_and_strips_time() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(format_date(&Cell::Date(d)), "05/01/2020");
        assert_eq!(format_date(&text("01/01/2020 00:00:00")), "01/01/2020");
        assert_eq!(format_date(&text("31/12/2099")), "31/12/2099");
        assert_eq!(format_date(&Cell::Empty), "");
    }
}
