//! Applicant histograms over age range, gender, education and posting title.

use std::collections::BTreeMap;

use super::repository::ApplicantStatsRow;
use super::views::ApplicantStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    TeensOrUnderTwenty,
    Twenties,
    Thirties,
    Forties,
    FiftiesAndOver,
}

impl AgeBracket {
    /// Thresholds are strict and checked from the top: 51 is "50s+", 50 is "40s".
    pub const fn for_age(age: i32) -> Self {
        if age > 50 {
            Self::FiftiesAndOver
        } else if age > 40 {
            Self::Forties
        } else if age > 30 {
            Self::Thirties
        } else if age > 20 {
            Self::Twenties
        } else {
            Self::TeensOrUnderTwenty
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TeensOrUnderTwenty => "teens-or-under20",
            Self::Twenties => "20s",
            Self::Thirties => "30s",
            Self::Forties => "40s",
            Self::FiftiesAndOver => "50s+",
        }
    }
}

fn bump(histogram: &mut BTreeMap<String, usize>, label: &str) {
    *histogram.entry(label.to_string()).or_insert(0) += 1;
}

/// Single pass over the rows; age is `current_year - birth_year`.
pub fn aggregate<'a, I>(rows: I, current_year: i32) -> ApplicantStatistics
where
    I: IntoIterator<Item = &'a ApplicantStatsRow>,
{
    let mut stats = ApplicantStatistics::default();

    for row in rows {
        let bracket = AgeBracket::for_age(current_year.saturating_sub(row.birth_year));
        bump(&mut stats.age, bracket.label());
        bump(&mut stats.gender, row.gender.label());
        bump(&mut stats.education, row.education.label());
        bump(&mut stats.jobpost_title, &row.jobpost_title);
    }

    stats
}
