use serde::{Deserialize, Serialize};

/// Calendar unit of a subscription period as reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPeriod {
    pub unit: PeriodUnit,
    pub number_of_units: u32,
}

impl SubscriptionPeriod {
    pub fn new(unit: PeriodUnit, number_of_units: u32) -> Self {
        Self {
            unit,
            number_of_units,
        }
    }

    /// Paywall label for the period.
    ///
    /// Stores report a weekly plan either as 1 week or as 7 days; both render as "Week".
    /// Monthly and yearly plans always render with the fixed "1 Month" / "12 Month" labels.
    pub fn label(&self) -> String {
        match self.unit {
            PeriodUnit::Day if self.number_of_units == 7 => "Week".to_string(),
            PeriodUnit::Day => format_days(self.number_of_units),
            PeriodUnit::Week if self.number_of_units == 1 => "Week".to_string(),
            PeriodUnit::Week => format_days(self.number_of_units * 7),
            PeriodUnit::Month => "1 Month".to_string(),
            PeriodUnit::Year => "12 Month".to_string(),
        }
    }
}

fn format_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// A purchasable package offered on the paywall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub package_id: String,
    pub product_id: String,
    /// Localized price string, as the store formats it
    pub localized_price: String,
    /// None for non-renewing (lifetime) products
    pub period: Option<SubscriptionPeriod>,
    /// Length of the introductory trial, if any
    pub trial_days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_days_is_a_week() {
        assert_eq!(SubscriptionPeriod::new(PeriodUnit::Day, 7).label(), "Week");
    }

    #[test]
    fn test_days_are_counted() {
        assert_eq!(SubscriptionPeriod::new(PeriodUnit::Day, 3).label(), "3 days");
        assert_eq!(SubscriptionPeriod::new(PeriodUnit::Day, 1).label(), "1 day");
    }

    #[test]
    fn test_multi_week_renders_days() {
        assert_eq!(SubscriptionPeriod::new(PeriodUnit::Week, 2).label(), "14 days");
    }

    #[test]
    fn test_month_and_year_labels() {
        assert_eq!(SubscriptionPeriod::new(PeriodUnit::Month, 1).label(), "1 Month");
        assert_eq!(SubscriptionPeriod::new(PeriodUnit::Year, 1).label(), "12 Month");
    }
}
