use contracts::domain::a001_sale_entry::dto::LastSaleResponse;
use contracts::domain::a002_employee::aggregate::Employee;
use contracts::shared::format::LocaleFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_sale_entry::api;
use crate::domain::a002_employee::api as employee_api;
use crate::layout::context::use_ui;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_date;
use crate::system::auth::context::use_auth;

#[component]
pub fn LastSaleTab() -> impl IntoView {
    let ui = use_ui();
    let (auth_state, _) = use_auth();

    let (last, set_last) = create_signal(Option::<LastSaleResponse>::None);
    let (roster, set_roster) = create_signal(Vec::<Employee>::new());
    let (is_loading, set_is_loading) = create_signal(true);

    create_effect(move |_| {
        ui.data_version().get();
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                set_is_loading.set(true);
                if let Ok(roster) = employee_api::list_employees(&token).await {
                    set_roster.set(roster);
                }
                match api::last_entry(&token).await {
                    Ok(response) => set_last.set(response),
                    Err(e) => log::error!("Failed to load last entry: {}", e),
                }
                set_is_loading.set(false);
            });
        }
    });

    let locale = LocaleFormat::es_es();

    let caption = move || {
        last.get().map(|response| {
            let entry = &response.entry;
            let name = roster
                .get()
                .iter()
                .find(|e| e.base.id.value().to_string() == entry.employee_id)
                .map(|e| e.display_name.clone())
                .unwrap_or_else(|| entry.employee_id.clone());
            format!("{} — {}", format_date(&entry.entry_date), name)
        })
    };

    let revenue = {
        let locale = locale.clone();
        Signal::derive(move || {
            last.get().map(|r| locale.format_currency(r.entry.revenue))
        })
    };
    let conversion = {
        let locale = locale.clone();
        Signal::derive(move || {
            last.get().map(|r| locale.format_percentage(r.entry.conversion))
        })
    };
    let ticket_medio = {
        let locale = locale.clone();
        Signal::derive(move || {
            last.get().map(|r| locale.format_currency(r.entry.ticket_medio))
        })
    };
    let productividad = {
        let locale = locale.clone();
        Signal::derive(move || {
            last.get()
                .map(|r| format!("{}/h", locale.format_currency(r.entry.productividad)))
        })
    };

    let revenue_trend = Signal::derive(move || {
        last.get().and_then(|r| r.trends.map(|t| t.revenue))
    });
    let conversion_trend = Signal::derive(move || {
        last.get().and_then(|r| r.trends.map(|t| t.conversion))
    });
    let ticket_trend = Signal::derive(move || {
        last.get().and_then(|r| r.trends.map(|t| t.ticket_medio))
    });
    let productividad_trend = Signal::derive(move || {
        last.get().and_then(|r| r.trends.map(|t| t.productividad))
    });

    view! {
        <div class="last-sale">
            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="loading">"Cargando..."</p> }
            >
                <Show
                    when=move || last.get().is_some()
                    fallback=|| view! { <p class="empty-state">"Sin ventas registradas"</p> }
                >
                    <h2 class="last-sale__caption">{caption}</h2>
                    <div class="stat-grid">
                        <StatCard
                            label="Venta"
                            value=revenue
                            trend=revenue_trend
                        />
                        <StatCard
                            label="Conversión"
                            value=conversion
                            trend=conversion_trend
                        />
                        <StatCard
                            label="Ticket medio"
                            value=ticket_medio
                            trend=ticket_trend
                        />
                        <StatCard
                            label="Productividad"
                            value=productividad
                            trend=productividad_trend
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
