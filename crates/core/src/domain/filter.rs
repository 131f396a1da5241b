use chrono::NaiveDate;

use crate::errors::DomainError;

/// Optional, independently combinable read constraints.
///
/// All active constraints are conjoined. The persistence layer translates
/// this into a WHERE clause; see `SqlMessageRepository::find_filtered`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub customerid: Option<i64>,
    pub message_type: Option<String>,
}

impl MessageFilter {
    /// Build a filter from raw request parameters.
    ///
    /// Date strings must match the accepted shape (see [`parse_date_param`]).
    /// A `customerid` of 0 and an empty `type` disable their constraints.
    pub fn new(
        start_date: Option<&str>,
        end_date: Option<&str>,
        customerid: Option<i64>,
        message_type: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            start_date: start_date.map(parse_date_param).transpose()?,
            end_date: end_date.map(parse_date_param).transpose()?,
            customerid: customerid.filter(|id| *id != 0),
            message_type: message_type.filter(|t| !t.is_empty()).map(str::to_owned),
        })
    }

    /// True when no constraint is active, i.e. the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.customerid.is_none()
            && self.message_type.is_none()
    }
}

/// Parse a date parameter of the shape: 4 digits, one optional non-word
/// separator, 2 digits, one optional non-word separator, 2 digits.
///
/// Accepts `2023-07-01`, `20230701`, `2023.07.01` and the like; the digits
/// must also form a real calendar date.
pub fn parse_date_param(raw: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::InvalidDate { value: raw.to_string() };

    let (year, rest) = take_digits(raw, 4).ok_or_else(invalid)?;
    let rest = skip_separator(rest);
    let (month, rest) = take_digits(rest, 2).ok_or_else(invalid)?;
    let rest = skip_separator(rest);
    let (day, rest) = take_digits(rest, 2).ok_or_else(invalid)?;
    if !rest.is_empty() {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(invalid)
}

fn take_digits(input: &str, count: usize) -> Option<(u32, &str)> {
    let head = input.get(..count)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok().map(|value| (value, &input[count..]))
}

fn skip_separator(input: &str) -> &str {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if !c.is_alphanumeric() && c != '_' => chars.as_str(),
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::errors::DomainError;

    use super::{parse_date_param, MessageFilter};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn accepts_the_documented_date_shapes() {
        for raw in ["2023-07-01", "20230701", "2023.07.01", "2023/07/01", "2023-0701"] {
            assert_eq!(parse_date_param(raw).expect(raw), date(2023, 7, 1), "{raw}");
        }
    }

    #[test]
    fn rejects_other_date_shapes() {
        for raw in [
            "2023x07x01",
            "2023_07_01",
            "23-07-01",
            "2023-7-1",
            "2023--07-01",
            "2023-07-01T00",
            "01-07-2023",
            "",
        ] {
            let error = parse_date_param(raw).expect_err(raw);
            assert!(matches!(error, DomainError::InvalidDate { .. }), "{raw}");
        }
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        for raw in ["20231301", "2023-02-30", "20230700"] {
            assert!(parse_date_param(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn builds_an_empty_filter_from_no_parameters() {
        let filter = MessageFilter::new(None, None, None, None).expect("filter");
        assert!(filter.is_empty());
    }

    #[test]
    fn combines_all_four_constraints() {
        let filter = MessageFilter::new(
            Some("2023-07-01"),
            Some("20230702"),
            Some(1),
            Some("A"),
        )
        .expect("filter");

        assert_eq!(filter.start_date, Some(date(2023, 7, 1)));
        assert_eq!(filter.end_date, Some(date(2023, 7, 2)));
        assert_eq!(filter.customerid, Some(1));
        assert_eq!(filter.message_type.as_deref(), Some("A"));
    }

    #[test]
    fn zero_customerid_disables_the_customer_constraint() {
        let filter = MessageFilter::new(None, None, Some(0), None).expect("filter");
        assert_eq!(filter.customerid, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn empty_type_disables_the_type_constraint() {
        let filter = MessageFilter::new(None, None, None, Some("")).expect("filter");
        assert_eq!(filter.message_type, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn bad_date_parameter_fails_the_whole_filter() {
        let result = MessageFilter::new(Some("2023-07-01"), Some("not-a-date"), None, None);
        assert!(result.is_err());
    }
}
