use contracts::shared::calc::{Trend, TrendDirection};
use leptos::prelude::*;

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Formatted value (None = loading / no data)
    #[prop(into)]
    value: Signal<Option<String>>,
    /// Change relative to the previous record, with direction arrow
    #[prop(into, optional)]
    trend: Signal<Option<Trend>>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || value.get().unwrap_or_else(|| "—".to_string());

    let trend_view = move || {
        trend.get().map(|t| {
            let (arrow, cls) = match t.direction {
                TrendDirection::Positive => ("\u{2191}", "stat-card__trend stat-card__trend--up"),
                TrendDirection::Negative => ("\u{2193}", "stat-card__trend stat-card__trend--down"),
                TrendDirection::Neutral => ("=", "stat-card__trend stat-card__trend--flat"),
            };
            let text = format!("{} {:.1}%", arrow, t.percentage);
            view! { <span class=cls>{text}</span> }
        })
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__label">{label}</div>
            <div class="stat-card__value">
                {formatted}
                {trend_view}
            </div>
            {subtitle_view}
        </div>
    }
}
