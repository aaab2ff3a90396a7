use time::{macros::format_description, OffsetDateTime};
use yew::prelude::*;

/// Format a timestamp to represent a date.
pub fn date(dt: OffsetDateTime) -> Html {
    date_string(dt).into()
}

pub fn date_string(dt: OffsetDateTime) -> String {
    let fmt = format_description!("[month repr:short] [day], [year]");

    let date = dt.date();
    date.format(fmt).unwrap_or_else(|err| {
        log::info!("Failed to format date: {err}");
        date.to_string()
    })
}

/// Parse a `YYYY-MM-DD` form field into a UTC midnight timestamp. Empty
/// input is not an error, the field is optional.
pub fn parse_date(input: &str) -> Result<Option<OffsetDateTime>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let fmt = format_description!("[year]-[month]-[day]");
    let date = time::Date::parse(input, fmt).map_err(|err| err.to_string())?;
    Ok(Some(date.midnight().assume_utc()))
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn short_date() {
        assert_eq!(date_string(datetime!(2023-10-25 00:00:00 UTC)), "Oct 25, 2023");
    }

    #[test]
    fn parse_date_field() {
        assert_eq!(parse_date(""), Ok(None));
        assert_eq!(
            parse_date("2024-03-01"),
            Ok(Some(datetime!(2024-03-01 00:00:00 UTC)))
        );
        assert!(parse_date("03/01/2024").is_err());
    }
}
