//! Accepted textual date layouts.
//!
//! Each [`FormatRule`] pairs the layout name used in messages with the chrono
//! format string that reads it. Matching fills a [`Parsed`] and takes the literal
//! month, day and year out of it without resolving them to a calendar date, so
//! "April 31" comes back as day 31 and validation can report exactly what was
//! wrong.

use chrono::format::{self, Parsed, StrftimeItems};

/// Numbers pulled out of a token by a matching rule, not yet calendar-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// An accepted layout, named by its `DateTimeFormatter`-style pattern.
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pattern: &'static str,
    format: &'static str,
}

/// All layouts, in the order they are tried. The first match wins.
///
/// chrono reads `%m` and `%d` as one or two digits, so a zero-padded layout and
/// its unpadded twin share a format string.
pub static FORMAT_RULES: &[FormatRule] = &[
    // 02/27/17
    FormatRule {
        pattern: "MM/dd/yy",
        format: "%m/%d/%y",
    },
    // June 2, 2018
    FormatRule {
        pattern: "MMMM d, yyyy",
        format: "%B %d, %Y",
    },
    // Jul-13-2016
    FormatRule {
        pattern: "MMM-dd-yyyy",
        format: "%b-%d-%Y",
    },
    FormatRule {
        pattern: "MMMM dd, yyyy",
        format: "%B %d, %Y",
    },
    // 2/3/2020
    FormatRule {
        pattern: "M/d/yyyy",
        format: "%m/%d/%Y",
    },
    FormatRule {
        pattern: "M/d/yy",
        format: "%m/%d/%y",
    },
    // June 15 2021
    FormatRule {
        pattern: "MMMM d yyyy",
        format: "%B %d %Y",
    },
    // Mar-5-2022
    FormatRule {
        pattern: "MMM-d-yyyy",
        format: "%b-%d-%Y",
    },
];

/// Human-readable list of the primary layouts, used in error messages.
pub const SUPPORTED_FORMATS: &str = "MM/dd/yy, MMMM d, yyyy, and MMM-dd-yyyy";

impl FormatRule {
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    pub fn format(&self) -> &'static str {
        self.format
    }

    /// Match the whole of `token` against this layout.
    ///
    /// Two-digit years are read as `20yy`.
    pub fn apply(&self, token: &str) -> Option<RawDate> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, token, StrftimeItems::new(self.format)).ok()?;

        let year = parsed
            .year()
            .or_else(|| parsed.year_mod_100().map(|yy| 2000 + yy))?;
        Some(RawDate {
            year,
            month: parsed.month()?,
            day: parsed.day()?,
        })
    }
}

/// Try every rule in priority order and return the first match.
pub fn match_rules(token: &str) -> Option<(&'static FormatRule, RawDate)> {
    FORMAT_RULES
        .iter()
        .find_map(|rule| rule.apply(token).map(|raw| (rule, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str) -> &'static FormatRule {
        FORMAT_RULES
            .iter()
            .find(|r| r.pattern() == pattern)
            .unwrap()
    }

    #[test]
    fn rules_are_tried_in_fixed_order() {
        let patterns: Vec<_> = FORMAT_RULES.iter().map(FormatRule::pattern).collect();
        assert_eq!(
            patterns,
            vec![
                "MM/dd/yy",
                "MMMM d, yyyy",
                "MMM-dd-yyyy",
                "MMMM dd, yyyy",
                "M/d/yyyy",
                "M/d/yy",
                "MMMM d yyyy",
                "MMM-d-yyyy",
            ]
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let (rule, raw) = match_rules("June 12, 2018").unwrap();
        assert_eq!(rule.pattern(), "MMMM d, yyyy");
        assert_eq!(raw, RawDate { year: 2018, month: 6, day: 12 });

        // Unpadded numbers are accepted by the first numeric layout already.
        let (rule, raw) = match_rules("2/7/17").unwrap();
        assert_eq!(rule.pattern(), "MM/dd/yy");
        assert_eq!(raw, RawDate { year: 2017, month: 2, day: 7 });

        let (rule, _) = match_rules("2/3/2020").unwrap();
        assert_eq!(rule.pattern(), "M/d/yyyy");

        let (rule, _) = match_rules("June 15 2021").unwrap();
        assert_eq!(rule.pattern(), "MMMM d yyyy");
    }

    #[test]
    fn day_is_not_clamped_to_month_length() {
        let raw = rule("MMMM d, yyyy").apply("April 31, 2018").unwrap();
        assert_eq!(raw, RawDate { year: 2018, month: 4, day: 31 });

        let raw = rule("MM/dd/yy").apply("02/30/17").unwrap();
        assert_eq!(raw, RawDate { year: 2017, month: 2, day: 30 });
    }

    #[test]
    fn extra_digits_do_not_match() {
        assert!(rule("MM/dd/yy").apply("2/3/2020").is_none());
        assert!(rule("M/d/yyyy").apply("2/3/20201").is_none());
        assert!(match_rules("123/01/17").is_none());
    }

    #[test]
    fn out_of_range_fields_do_not_match() {
        assert!(match_rules("13/01/17").is_none());
        assert!(match_rules("01/32/17").is_none());
        assert!(match_rules("June 0, 2018").is_none());
    }

    #[test]
    fn month_names_match_case_insensitively() {
        let raw = rule("MMMM d, yyyy").apply("june 2, 2018").unwrap();
        assert_eq!(raw.month, 6);
        let raw = rule("MMM-dd-yyyy").apply("JUL-13-2016").unwrap();
        assert_eq!(raw.month, 7);
    }

    #[test]
    fn abbreviated_month_layout_rejects_full_names() {
        assert!(rule("MMM-dd-yyyy").apply("July-13-2016").is_none());
        assert!(rule("MMMM d, yyyy").apply("Jun 15, 2021").is_some());
    }

    #[test]
    fn trailing_text_prevents_a_match() {
        assert!(match_rules("June 2, 2018 extra").is_none());
        assert!(match_rules("Junee 2, 2018").is_none());
    }
}
