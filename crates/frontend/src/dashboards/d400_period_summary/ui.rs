use contracts::dashboards::d400_period_summary::{PeriodSummaryRequest, PeriodSummaryResponse};
use contracts::shared::format::LocaleFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d400_period_summary::api;
use crate::domain::a001_sale_entry::api as sale_api;
use crate::layout::context::use_ui;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::{current_year_month, format_day_label};
use crate::shared::download::download_csv;
use crate::system::auth::context::use_auth;

/// The goal lives client-side; it travels with every summary request
const GOAL_STORAGE_KEY: &str = "dashboard_monthly_goal";

#[derive(Clone, Copy, PartialEq, Eq)]
enum RangeFilter {
    ThisMonth,
    ThisYear,
    Custom,
}

fn load_stored_goal() -> String {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(GOAL_STORAGE_KEY).ok().flatten())
        .unwrap_or_default()
}

fn store_goal(raw: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        if raw.trim().is_empty() {
            let _ = storage.remove_item(GOAL_STORAGE_KEY);
        } else {
            let _ = storage.set_item(GOAL_STORAGE_KEY, raw.trim());
        }
    }
}

#[component]
pub fn PeriodSummaryTab() -> impl IntoView {
    let ui = use_ui();
    let (auth_state, _) = use_auth();

    let (year, month) = current_year_month();
    let default_range = PeriodSummaryRequest::for_month(year, month);

    let (filter, set_filter) = create_signal(RangeFilter::ThisMonth);
    let (custom_from, set_custom_from) = create_signal(default_range.date_from.clone());
    let (custom_to, set_custom_to) = create_signal(default_range.date_to.clone());
    let (goal_input, set_goal_input) = create_signal(load_stored_goal());
    let (summary, set_summary) = create_signal(Option::<PeriodSummaryResponse>::None);
    let (is_loading, set_is_loading) = create_signal(true);

    let request = move || {
        let (year, month) = current_year_month();
        let mut request = match filter.get() {
            RangeFilter::ThisMonth => PeriodSummaryRequest::for_month(year, month),
            RangeFilter::ThisYear => PeriodSummaryRequest::for_year(year),
            RangeFilter::Custom => PeriodSummaryRequest {
                date_from: custom_from.get(),
                date_to: custom_to.get(),
                monthly_goal: None,
            },
        };
        request.monthly_goal = goal_input
            .get()
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|g| *g > 0.0);
        request
    };

    create_effect(move |_| {
        ui.data_version().get();
        let request = request();
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                set_is_loading.set(true);
                match api::get_period_summary(&token, &request).await {
                    Ok(response) => set_summary.set(Some(response)),
                    Err(e) => log::error!("Failed to load period summary: {}", e),
                }
                set_is_loading.set(false);
            });
        }
    });

    let on_export = move |_| {
        let request = request();
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                match sale_api::export_csv(&token, &request.date_from, &request.date_to).await {
                    Ok(content) => {
                        let filename =
                            format!("ventas_{}_{}.csv", request.date_from, request.date_to);
                        if let Err(e) = download_csv(&content, &filename) {
                            log::error!("CSV download failed: {}", e);
                        }
                    }
                    Err(e) => log::error!("CSV export failed: {}", e),
                }
            });
        }
    };

    let on_goal_change = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        store_goal(&raw);
        set_goal_input.set(raw);
    };

    let filter_button = move |label: &'static str, value: RangeFilter| {
        let class = move || {
            if filter.get() == value {
                "filter-button filter-button--active"
            } else {
                "filter-button"
            }
        };
        view! {
            <button class=class on:click=move |_| set_filter.set(value)>
                {label}
            </button>
        }
    };

    let locale = LocaleFormat::es_es();

    let total_revenue = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary.get().map(|s| locale.format_currency(s.totals.revenue))
        })
    };
    let revenue_subtitle = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary
                .get()
                .map(|s| format!("media diaria {}", locale.format_currency(s.revenue.avg)))
        })
    };
    let conversion_avg = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary
                .get()
                .map(|s| locale.format_percentage(s.conversion.avg))
        })
    };
    let conversion_subtitle = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary.get().map(|s| {
                format!(
                    "mín {} / máx {}",
                    locale.format_percentage(s.conversion.min),
                    locale.format_percentage(s.conversion.max)
                )
            })
        })
    };
    let ticket_avg = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary
                .get()
                .map(|s| locale.format_currency(s.ticket_medio.avg))
        })
    };
    let ticket_subtitle = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary.get().map(|s| {
                format!(
                    "mín {} / máx {}",
                    locale.format_currency(s.ticket_medio.min),
                    locale.format_currency(s.ticket_medio.max)
                )
            })
        })
    };
    let productividad_avg = {
        let locale = locale.clone();
        Signal::derive(move || {
            summary
                .get()
                .map(|s| format!("{}/h", locale.format_currency(s.productividad.avg)))
        })
    };

    let days_caption = move || {
        summary
            .get()
            .map(|s| format!("{} días registrados", s.days_recorded))
            .unwrap_or_default()
    };

    let goal_view = {
        let locale = locale.clone();
        move || {
            summary.get().and_then(|s| s.goal).map(|goal| {
                let width = goal.percentage.clamp(0, 100);
                let text = format!(
                    "{} de {} ({}%)",
                    locale.format_currency(goal.achieved),
                    locale.format_currency(goal.target),
                    goal.percentage
                );
                view! {
                    <div class="goal-card">
                        <div class="goal-card__text">{text}</div>
                        <div class="goal-card__track">
                            <div
                                class="goal-card__progress"
                                style=format!("width: {}%", width)
                            ></div>
                        </div>
                    </div>
                }
            })
        }
    };

    let revenue_chart = {
        let locale = locale.clone();
        move || {
            summary.get().map(|s| {
                let max = s.series.iter().map(|p| p.revenue).fold(0.0_f64, f64::max);
                let bars = s
                    .series
                    .iter()
                    .map(|p| {
                        let height = if max > 0.0 {
                            (p.revenue / max * 100.0).max(2.0)
                        } else {
                            2.0
                        };
                        let title = format!(
                            "{}: {}",
                            format_day_label(&p.date),
                            locale.format_currency(p.revenue)
                        );
                        view! {
                            <div
                                class="chart__bar"
                                style=format!("height: {:.0}%", height)
                                title=title
                            ></div>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="chart">
                        <h3>"Evolución de ventas"</h3>
                        <div class="chart__bars">{bars}</div>
                    </div>
                }
            })
        }
    };

    let conversion_chart = {
        let locale = locale.clone();
        move || {
            summary.get().map(|s| {
                let max = s.series.iter().map(|p| p.conversion).fold(0.0_f64, f64::max);
                let bars = s
                    .series
                    .iter()
                    .map(|p| {
                        let height = if max > 0.0 {
                            (p.conversion / max * 100.0).max(2.0)
                        } else {
                            2.0
                        };
                        let title = format!(
                            "{}: {}",
                            format_day_label(&p.date),
                            locale.format_percentage(p.conversion)
                        );
                        view! {
                            <div
                                class="chart__bar chart__bar--alt"
                                style=format!("height: {:.0}%", height)
                                title=title
                            ></div>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="chart">
                        <h3>"Evolución de conversión"</h3>
                        <div class="chart__bars">{bars}</div>
                    </div>
                }
            })
        }
    };

    let employee_split = {
        let locale = locale.clone();
        move || {
            summary.get().map(|s| {
                let total: f64 = s.by_employee.iter().map(|e| e.revenue).sum();
                let rows = s
                    .by_employee
                    .iter()
                    .map(|e| {
                        let pct = if total > 0.0 {
                            e.revenue / total * 100.0
                        } else {
                            0.0
                        };
                        view! {
                            <div class="split__row">
                                <span class="split__name">{e.display_name.clone()}</span>
                                <div class="split__track">
                                    <div
                                        class="split__bar"
                                        style=format!(
                                            "width: {:.0}%; background-color: {}",
                                            pct,
                                            e.color
                                        )
                                    ></div>
                                </div>
                                <span class="split__value">
                                    {locale.format_currency(e.revenue)}
                                </span>
                            </div>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="split">
                        <h3>"Ventas por empleada"</h3>
                        {rows}
                    </div>
                }
            })
        }
    };

    view! {
        <div class="period-summary">
            <div class="filter-bar">
                {filter_button("Este mes", RangeFilter::ThisMonth)}
                {filter_button("Este año", RangeFilter::ThisYear)}
                {filter_button("Personalizado", RangeFilter::Custom)}

                <Show when=move || filter.get() == RangeFilter::Custom>
                    <input
                        type="date"
                        value=move || custom_from.get()
                        on:change=move |ev| set_custom_from.set(event_target_value(&ev))
                    />
                    <input
                        type="date"
                        value=move || custom_to.get()
                        on:change=move |ev| set_custom_to.set(event_target_value(&ev))
                    />
                </Show>

                <button class="btn-secondary" on:click=on_export>
                    "Exportar CSV"
                </button>
            </div>

            <div class="goal-bar">
                <label for="monthly-goal">"Objetivo mensual (€)"</label>
                <input
                    type="number"
                    id="monthly-goal"
                    min="0"
                    step="100"
                    value=move || goal_input.get()
                    on:change=on_goal_change
                />
            </div>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="loading">"Cargando..."</p> }
            >
                <p class="period-summary__days">{days_caption}</p>

                {goal_view.clone()}

                <div class="stat-grid">
                    <StatCard
                        label="Venta total"
                        value=total_revenue
                        subtitle=revenue_subtitle
                    />
                    <StatCard
                        label="Conversión media"
                        value=conversion_avg
                        subtitle=conversion_subtitle
                    />
                    <StatCard
                        label="Ticket medio"
                        value=ticket_avg
                        subtitle=ticket_subtitle
                    />
                    <StatCard
                        label="Productividad media"
                        value=productividad_avg
                    />
                </div>

                <div class="chart-grid">
                    {revenue_chart.clone()}
                    {conversion_chart.clone()}
                </div>

                {employee_split.clone()}
            </Show>
        </div>
    }
}
