use std::collections::HashMap;

use contracts::domain::a001_sale_entry::dto::DailyLedgerDay;
use contracts::domain::a002_employee::aggregate::Employee;
use contracts::shared::format::LocaleFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_sale_entry::api;
use crate::domain::a002_employee::api as employee_api;
use crate::layout::context::use_ui;
use crate::shared::date_utils::format_date;
use crate::system::auth::context::use_auth;

/// id -> (name, color) lookup for badges and detail rows
fn roster_lookup(roster: &[Employee]) -> HashMap<String, (String, String)> {
    roster
        .iter()
        .map(|e| {
            (
                e.base.id.value().to_string(),
                (e.display_name.clone(), e.color.clone()),
            )
        })
        .collect()
}

#[component]
pub fn DailyLedgerTab() -> impl IntoView {
    let ui = use_ui();
    let (auth_state, _) = use_auth();

    let (days, set_days) = create_signal(Vec::<DailyLedgerDay>::new());
    let (roster, set_roster) = create_signal(Vec::<Employee>::new());
    let (is_loading, set_is_loading) = create_signal(true);
    let (expanded_day, set_expanded_day) = create_signal(Option::<String>::None);

    // Reload whenever an entry is created, updated or deleted
    create_effect(move |_| {
        ui.data_version().get();
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                set_is_loading.set(true);
                if let Ok(roster) = employee_api::list_employees(&token).await {
                    set_roster.set(roster);
                }
                match api::daily_ledger(&token).await {
                    Ok(result) => set_days.set(result),
                    Err(e) => log::error!("Failed to load daily ledger: {}", e),
                }
                set_is_loading.set(false);
            });
        }
    });

    let on_delete_day = move |date: String| {
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                match api::delete_day(&token, &date).await {
                    Ok(_) => ui.notify_data_changed(),
                    Err(e) => log::error!("Failed to delete day {}: {}", date, e),
                }
            });
        }
    };

    let on_delete_entry = move |id: String| {
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                match api::delete_entry(&token, &id).await {
                    Ok(()) => ui.notify_data_changed(),
                    Err(e) => log::error!("Failed to delete entry {}: {}", id, e),
                }
            });
        }
    };

    let locale = LocaleFormat::es_es();

    let day_cards = move || {
        let lookup = roster_lookup(&roster.get());
        let locale = locale.clone();

        days.get()
            .into_iter()
            .map(|day| {
                let date = day.date.clone();
                let is_expanded = {
                    let date = date.clone();
                    move || expanded_day.get().as_deref() == Some(date.as_str())
                };
                let toggle_date = date.clone();
                let on_toggle = move |_| {
                    let date = toggle_date.clone();
                    set_expanded_day.update(|current| {
                        if current.as_deref() == Some(date.as_str()) {
                            *current = None;
                        } else {
                            *current = Some(date);
                        }
                    });
                };

                let combined_revenue = day
                    .combined
                    .as_ref()
                    .map(|c| locale.format_currency(c.totals.revenue))
                    .unwrap_or_else(|| "—".to_string());

                let badges = day
                    .entries
                    .iter()
                    .map(|entry| {
                        let (name, color) = lookup
                            .get(&entry.employee_id)
                            .cloned()
                            .unwrap_or((entry.employee_id.clone(), "#888888".to_string()));
                        view! {
                            <span class="badge" style=format!("background-color: {}", color)>
                                {name}
                            </span>
                        }
                    })
                    .collect_view();

                let dropped_note = (day.dropped_duplicates > 0).then(|| {
                    view! {
                        <span class="day-card__warning">
                            {format!("{} duplicados ignorados", day.dropped_duplicates)}
                        </span>
                    }
                });

                let detail = {
                    let day = day.clone();
                    let lookup = lookup.clone();
                    let locale = locale.clone();
                    let delete_date = date.clone();
                    move || {
                        let rows = day
                            .entries
                            .iter()
                            .map(|entry| {
                                let (name, _) = lookup
                                    .get(&entry.employee_id)
                                    .cloned()
                                    .unwrap_or((entry.employee_id.clone(), String::new()));
                                let id = entry.base.id.value().to_string();
                                let edit_entry = entry.clone();
                                let delete_id = id.clone();
                                view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>{locale.format_currency(entry.revenue)}</td>
                                        <td>{entry.transactions}</td>
                                        <td>{locale.format_percentage(entry.conversion)}</td>
                                        <td>{locale.format_currency(entry.ticket_medio)}</td>
                                        <td class="ledger__actions">
                                            <button
                                                class="btn-link"
                                                on:click=move |_| ui.open_edit_entry(edit_entry.clone())
                                            >
                                                "Editar"
                                            </button>
                                            <button
                                                class="btn-link btn-link--danger"
                                                on:click=move |_| on_delete_entry(delete_id.clone())
                                            >
                                                "Borrar"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view();

                        let combined_row = day.combined.as_ref().map(|c| {
                            view! {
                                <tr class="ledger__combined">
                                    <td>"Total"</td>
                                    <td>{locale.format_currency(c.totals.revenue)}</td>
                                    <td>{c.totals.transactions}</td>
                                    <td>{locale.format_percentage(c.ratios.conversion)}</td>
                                    <td>{locale.format_currency(c.ratios.ticket_medio)}</td>
                                    <td></td>
                                </tr>
                            }
                        });

                        let delete_date = delete_date.clone();
                        view! {
                            <div class="day-card__detail">
                                <table class="ledger">
                                    <thead>
                                        <tr>
                                            <th>"Empleada"</th>
                                            <th>"Venta"</th>
                                            <th>"Operaciones"</th>
                                            <th>"Conversión"</th>
                                            <th>"Ticket medio"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {rows}
                                        {combined_row}
                                    </tbody>
                                </table>
                                <button
                                    class="btn-danger"
                                    on:click=move |_| on_delete_day(delete_date.clone())
                                >
                                    "Eliminar día"
                                </button>
                            </div>
                        }
                    }
                };

                view! {
                    <div class="day-card">
                        <div class="day-card__header" on:click=on_toggle>
                            <span class="day-card__date">{format_date(&date)}</span>
                            <span class="day-card__revenue">{combined_revenue}</span>
                            <span class="day-card__badges">{badges}</span>
                            {dropped_note}
                        </div>
                        <Show when=is_expanded>{detail.clone()}</Show>
                    </div>
                }
            })
            .collect_view()
    };
    let day_cards = StoredValue::new(day_cards);

    view! {
        <div class="daily-ledger">
            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="loading">"Cargando..."</p> }
            >
                <Show
                    when=move || !days.get().is_empty()
                    fallback=|| view! { <p class="empty-state">"Sin ventas registradas"</p> }
                >
                    <div class="day-card-list">{move || day_cards.with_value(|f| f())}</div>
                </Show>
            </Show>
        </div>
    }
}
