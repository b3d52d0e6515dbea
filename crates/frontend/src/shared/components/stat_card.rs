use crate::shared::icons::icon;
use leptos::prelude::*;

/// Visual accent of a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Positive,
    Negative,
}

impl StatTone {
    pub fn class(self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-card",
            StatTone::Positive => "stat-card stat-card--success",
            StatTone::Negative => "stat-card stat-card--error",
        }
    }

    /// Tone for a signed amount: credits are positive, debits negative.
    pub fn for_amount(amount: f64) -> Self {
        if amount > 0.0 {
            StatTone::Positive
        } else if amount < 0.0 {
            StatTone::Negative
        } else {
            StatTone::Neutral
        }
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    #[prop(into, optional)]
    tone: Signal<StatTone>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class=move || tone.get().class()>
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_follows_sign() {
        assert_eq!(StatTone::for_amount(5.0), StatTone::Positive);
        assert_eq!(StatTone::for_amount(-0.01), StatTone::Negative);
        assert_eq!(StatTone::for_amount(0.0), StatTone::Neutral);
        assert_eq!(StatTone::Negative.class(), "stat-card stat-card--error");
    }
}
