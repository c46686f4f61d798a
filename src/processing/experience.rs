//! Professional experience estimation from date ranges

use crate::processing::round_to;
use regex::Regex;
use std::sync::OnceLock;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn year_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})\s*[–-]\s*(\d{4})").expect("Invalid year range regex"))
}

fn month_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Za-z]{3,9})\s*(\d{4})\s*(?:to|until|-|–)\s*([A-Za-z]{3,9})\s*(\d{4})")
            .expect("Invalid month range regex")
    })
}

fn education_section_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)EDUCATION(.+?)(EXPERIENCE|SKILLS|$)")
            .expect("Invalid education section regex")
    })
}

/// Years of professional experience, rounded to one decimal.
///
/// Every date range in the document is summed, then the ranges that fall in
/// the education section are taken back out so degree programmes are not
/// counted as work.
pub fn extract_experience(text: &str) -> f64 {
    let total_years = sum_year_spans(text);
    let edu_years = education_section(text).map(sum_year_spans).unwrap_or(0.0);

    round_to((total_years - edu_years).max(0.0), 1)
}

/// Text between an EDUCATION heading and the next EXPERIENCE/SKILLS heading
pub fn education_section(text: &str) -> Option<&str> {
    education_section_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Sum of every recognizable date range in `text`, in years
pub fn sum_year_spans(text: &str) -> f64 {
    let mut years = 0.0;

    for caps in year_range_regex().captures_iter(text) {
        let (Ok(start), Ok(end)) = (caps[1].parse::<i32>(), caps[2].parse::<i32>()) else {
            continue;
        };
        if end >= start {
            years += f64::from(end - start);
        }
    }

    for caps in month_range_regex().captures_iter(text) {
        let (Ok(start_year), Ok(end_year)) = (caps[2].parse::<i32>(), caps[4].parse::<i32>())
        else {
            continue;
        };
        let start_month = month_number(&caps[1]).unwrap_or(1);
        let end_month = month_number(&caps[3]).unwrap_or(12);

        let start = f64::from(start_year) + f64::from(start_month - 1) / 12.0;
        let end = f64::from(end_year) + f64::from(end_month - 1) / 12.0;
        if end >= start {
            years += end - start;
        }
    }

    years
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == name)
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_years_are_subtracted() {
        let text = "EDUCATION 2015-2019 BSc Informatics EXPERIENCE 2019-2022 Developer";
        assert_eq!(extract_experience(text), 3.0);
    }

    #[test]
    fn test_reversed_range_contributes_nothing() {
        assert_eq!(sum_year_spans("Worked 2020-2018 somewhere"), 0.0);
        assert_eq!(extract_experience("Worked 2020-2018 somewhere"), 0.0);
    }

    #[test]
    fn test_en_dash_and_spacing() {
        assert_eq!(extract_experience("Analyst 2012 – 2016"), 4.0);
    }

    #[test]
    fn test_month_ranges_use_calendar_fraction() {
        // March 2018 .. September 2020 = 2.5 years
        assert_eq!(extract_experience("March 2018 to September 2020 at Acme"), 2.5);
    }

    #[test]
    fn test_unknown_months_default_to_year_bounds() {
        // abbreviations are not month names, so this reads as January..December 2019
        let years = sum_year_spans("Sept 2019 until Octo 2019");
        assert!((years - 11.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_education_heading_subtracts_nothing() {
        let text = "Work: 2010-2012, 2014-2015";
        assert!(education_section(text).is_none());
        assert_eq!(extract_experience(text), 3.0);
    }

    #[test]
    fn test_education_section_runs_to_end_of_text() {
        let text = "Engineer 2016-2020\nEducation\nUniversity 2010-2014";
        assert_eq!(extract_experience(text), 4.0);
    }

    #[test]
    fn test_never_negative() {
        // Education section alone accounts for everything
        let text = "EDUCATION 2001-2005 and 2005-2006 SKILLS rust";
        assert_eq!(extract_experience(text), 0.0);
    }
}
