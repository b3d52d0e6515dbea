use contracts::dashboards::d400_profile::dto::DailyUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Overview,
    History,
    Transactions,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [
        ProfileTab::Overview,
        ProfileTab::History,
        ProfileTab::Transactions,
    ];

    pub fn value(self) -> &'static str {
        match self {
            ProfileTab::Overview => "overview",
            ProfileTab::History => "history",
            ProfileTab::Transactions => "transactions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Overview => "Обзор",
            ProfileTab::History => "История",
            ProfileTab::Transactions => "Транзакции",
        }
    }

    /// Unknown values fall back to the overview.
    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|tab| tab.value() == value)
            .unwrap_or_default()
    }
}

/// The backend groups by day without ordering; show the newest day first.
pub fn days_newest_first(days: &[DailyUsage]) -> Vec<DailyUsage> {
    let mut sorted = days.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// "Чат" / "Арена" label of a usage record.
pub fn session_type_label(session_type: &str) -> &str {
    match session_type {
        "chat" => "Чат",
        "arena" => "Арена",
        "arbitration" => "Арбитраж",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn tab_values_round_trip() {
        for tab in ProfileTab::ALL {
            assert_eq!(ProfileTab::from_value(tab.value()), tab);
        }
        assert_eq!(ProfileTab::from_value("nope"), ProfileTab::Overview);
    }

    #[test]
    fn days_sorted_descending() {
        let day = |d: u32| DailyUsage {
            date: NaiveDate::from_ymd_opt(2025, 3, d).unwrap(),
            requests: d as i64,
            cost: 0.0,
        };
        let sorted = days_newest_first(&[day(2), day(5), day(1)]);
        let order: Vec<_> = sorted.iter().map(|d| d.requests).collect();
        assert_eq!(order, vec![5, 2, 1]);
    }

    #[test]
    fn session_labels() {
        assert_eq!(session_type_label("arena"), "Арена");
        assert_eq!(session_type_label("custom"), "custom");
    }
}
