//! Built-in one-year Treasury constant maturity history
//!
//! Key observations from 1962 to 2025, annual in the 1960s-70s, semi-annual
//! from 1980 and quarterly from 2020. The source expands them to a monthly
//! series by linear interpolation between key points.

use chrono::{Datelike, NaiveDate};

use super::{RateHistory, RateHistorySource, RateObservation};
use crate::error::HistoryError;

/// (year, month, rate %) key points, all on the first of the month
const KEY_POINTS: &[(i32, u32, f64)] = &[
    // 1960s
    (1962, 1, 2.90), (1963, 1, 2.93), (1964, 1, 3.55), (1965, 1, 3.95),
    (1966, 1, 4.65), (1967, 1, 4.61), (1968, 1, 5.07), (1969, 1, 6.30),
    // 1970s
    (1970, 1, 7.91), (1971, 1, 4.91), (1972, 1, 4.07), (1973, 1, 5.94),
    (1974, 1, 7.38), (1975, 1, 7.13), (1976, 1, 5.87), (1977, 1, 5.10),
    (1978, 1, 7.22), (1979, 1, 10.04),
    // 1980s
    (1980, 1, 12.06), (1980, 7, 9.82), (1981, 1, 13.82), (1981, 7, 16.30),
    (1982, 1, 14.57), (1982, 7, 12.92), (1983, 1, 8.62), (1983, 7, 9.40),
    (1984, 1, 9.90), (1984, 7, 11.96), (1985, 1, 9.00), (1985, 7, 7.88),
    (1986, 1, 7.73), (1986, 7, 6.56), (1987, 1, 5.87), (1987, 7, 6.65),
    (1988, 1, 6.83), (1988, 7, 7.75), (1989, 1, 9.16), (1989, 7, 8.45),
    // 1990s
    (1990, 1, 8.21), (1990, 7, 8.15), (1991, 1, 6.91), (1991, 7, 6.26),
    (1992, 1, 4.43), (1992, 7, 3.68), (1993, 1, 3.51), (1993, 7, 3.43),
    (1994, 1, 3.54), (1994, 7, 5.28), (1995, 1, 7.05), (1995, 7, 5.85),
    (1996, 1, 5.09), (1996, 7, 5.64), (1997, 1, 5.61), (1997, 7, 5.60),
    (1998, 1, 5.24), (1998, 7, 5.46), (1999, 1, 4.51), (1999, 7, 5.00),
    // 2000s
    (2000, 1, 6.12), (2000, 7, 6.21), (2001, 1, 5.16), (2001, 7, 3.65),
    (2002, 1, 2.14), (2002, 7, 1.93), (2003, 1, 1.37), (2003, 7, 1.08),
    (2004, 1, 1.13), (2004, 7, 1.80), (2005, 1, 2.78), (2005, 7, 3.61),
    (2006, 1, 4.42), (2006, 7, 5.11), (2007, 1, 5.05), (2007, 7, 4.82),
    (2008, 1, 2.71), (2008, 7, 2.36), (2009, 1, 0.44), (2009, 7, 0.56),
    // 2010s
    (2010, 1, 0.35), (2010, 7, 0.29), (2011, 1, 0.29), (2011, 7, 0.19),
    (2012, 1, 0.12), (2012, 7, 0.17), (2013, 1, 0.14), (2013, 7, 0.15),
    (2014, 1, 0.13), (2014, 7, 0.12), (2015, 1, 0.25), (2015, 7, 0.31),
    (2016, 1, 0.65), (2016, 7, 0.51), (2017, 1, 0.85), (2017, 7, 1.22),
    (2018, 1, 1.89), (2018, 7, 2.44), (2019, 1, 2.57), (2019, 7, 1.94),
    // 2020s
    (2020, 1, 1.53), (2020, 4, 0.23), (2020, 7, 0.16), (2020, 10, 0.13),
    (2021, 1, 0.10), (2021, 4, 0.06), (2021, 7, 0.07), (2021, 10, 0.13),
    (2022, 1, 0.51), (2022, 4, 1.64), (2022, 7, 2.83), (2022, 10, 4.08),
    (2023, 1, 4.65), (2023, 4, 4.69), (2023, 7, 5.12), (2023, 10, 5.39),
    (2024, 1, 4.57), (2024, 4, 4.83), (2024, 7, 4.35), (2024, 10, 4.15),
    (2025, 1, 4.10),
];

/// Months since year 0, for month-start dates
fn month_index(date: NaiveDate) -> i64 {
    date.year() as i64 * 12 + date.month0() as i64
}

fn month_start(index: i64) -> Option<NaiveDate> {
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Expand month-start key points to a complete monthly series
///
/// Months between two key points are linearly interpolated.
pub fn interpolate_monthly(key_points: &[RateObservation]) -> Vec<RateObservation> {
    let mut monthly = Vec::new();

    for pair in key_points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let (i0, i1) = (month_index(start.date), month_index(end.date));
        let span = (i1 - i0) as f64;

        for i in i0..i1 {
            let weight = (i - i0) as f64 / span;
            if let Some(date) = month_start(i) {
                let rate = start.rate_percent + weight * (end.rate_percent - start.rate_percent);
                monthly.push(RateObservation::new(date, rate));
            }
        }
    }

    if let Some(&last) = key_points.last() {
        monthly.push(last);
    }

    monthly
}

/// History source backed by the built-in Treasury table
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedHistory;

impl EmbeddedHistory {
    /// Raw key points as observations
    pub fn key_points() -> Vec<RateObservation> {
        KEY_POINTS
            .iter()
            .filter_map(|&(y, m, rate)| NaiveDate::from_ymd_opt(y, m, 1).map(|d| RateObservation::new(d, rate)))
            .collect()
    }
}

impl RateHistorySource for EmbeddedHistory {
    fn name(&self) -> &str {
        "embedded"
    }

    fn load(&self) -> Result<RateHistory, HistoryError> {
        let monthly = interpolate_monthly(&Self::key_points());
        if monthly.is_empty() {
            return Err(HistoryError::Empty);
        }
        RateHistory::new(monthly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_embedded_is_monthly_and_complete() {
        let history = EmbeddedHistory.load().unwrap();

        // January 1962 through January 2025 inclusive
        assert_eq!(history.len(), (2025 - 1962) * 12 + 1);
        assert_eq!(history.first_date(), NaiveDate::from_ymd_opt(1962, 1, 1));
        assert_eq!(history.last_date(), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(history.latest_rate(), Some(4.10));
    }

    #[test]
    fn test_interpolation_between_key_points() {
        let history = EmbeddedHistory.load().unwrap();
        let obs = history.observations();

        // 1980-01 (12.06) to 1980-07 (9.82): April is halfway
        let april = obs
            .iter()
            .find(|o| o.date == NaiveDate::from_ymd_opt(1980, 4, 1).unwrap())
            .unwrap();
        assert_abs_diff_eq!(april.rate_percent, (12.06 + 9.82) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_embedded_has_annual_changes() {
        let history = EmbeddedHistory.load().unwrap();
        // 1962..=2025 gives 64 annual means, hence 63 changes
        assert_eq!(history.annual_changes().len(), 63);
    }
}
