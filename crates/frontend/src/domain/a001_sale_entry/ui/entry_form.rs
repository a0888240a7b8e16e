use contracts::domain::a001_sale_entry::dto::{CreateSaleEntryRequest, UpdateSaleEntryRequest};
use contracts::domain::a002_employee::aggregate::Employee;
use contracts::shared::calc::{calculate_ratios, SaleFigures};
use contracts::shared::format::LocaleFormat;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_sale_entry::api;
use crate::domain::a002_employee::api as employee_api;
use crate::layout::context::use_ui;
use crate::shared::date_utils::today_iso;
use crate::system::auth::context::use_auth;

/// Parse the five figure inputs. Comma is accepted as decimal separator
/// on the monetary fields.
fn parse_figures(
    visitors: &str,
    transactions: &str,
    units: &str,
    revenue: &str,
    hours: &str,
) -> Result<SaleFigures, String> {
    fn parse_int(raw: &str, field: &str) -> Result<i64, String> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| format!("Introduce un número válido en '{}'", field))
    }
    fn parse_num(raw: &str, field: &str) -> Result<f64, String> {
        raw.trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| format!("Introduce un número válido en '{}'", field))
    }

    Ok(SaleFigures {
        visitors: parse_int(visitors, "clientes")?,
        transactions: parse_int(transactions, "operaciones")?,
        units: parse_int(units, "unidades")?,
        revenue: parse_num(revenue, "venta")?,
        hours_worked: parse_num(hours, "horas")?,
    })
}

#[component]
pub fn EntryFormModal() -> impl IntoView {
    let ui = use_ui();
    let (auth_state, _) = use_auth();

    let editing = ui.editing_entry.get_untracked();
    let is_edit = editing.is_some();

    let (entry_date, set_entry_date) = create_signal(
        editing
            .as_ref()
            .map(|e| e.entry_date.clone())
            .unwrap_or_else(today_iso),
    );
    let (employee_id, set_employee_id) = create_signal(
        editing
            .as_ref()
            .map(|e| e.employee_id.clone())
            .unwrap_or_default(),
    );
    let (visitors, set_visitors) =
        create_signal(editing.as_ref().map(|e| e.visitors.to_string()).unwrap_or_default());
    let (transactions, set_transactions) = create_signal(
        editing
            .as_ref()
            .map(|e| e.transactions.to_string())
            .unwrap_or_default(),
    );
    let (units, set_units) =
        create_signal(editing.as_ref().map(|e| e.units.to_string()).unwrap_or_default());
    let (revenue, set_revenue) =
        create_signal(editing.as_ref().map(|e| e.revenue.to_string()).unwrap_or_default());
    let (hours, set_hours) = create_signal(
        editing
            .as_ref()
            .map(|e| e.hours_worked.to_string())
            .unwrap_or_default(),
    );

    let (employees, set_employees) = create_signal(Vec::<Employee>::new());
    let (error_message, set_error_message) = create_signal(Option::<String>::None);
    let (is_saving, set_is_saving) = create_signal(false);

    // Load the roster for the employee select; default to the first member
    create_effect(move |_| {
        if let Some(token) = auth_state.get().access_token {
            spawn_local(async move {
                if let Ok(roster) = employee_api::list_employees(&token).await {
                    if employee_id.get_untracked().is_empty() {
                        if let Some(first) = roster.first() {
                            set_employee_id.set(first.base.id.value().to_string());
                        }
                    }
                    set_employees.set(roster);
                }
            });
        }
    });

    // Live ratio preview, recomputed as the user types
    let preview = move || {
        parse_figures(
            &visitors.get(),
            &transactions.get(),
            &units.get(),
            &revenue.get(),
            &hours.get(),
        )
        .ok()
        .and_then(|figures| calculate_ratios(&figures).ok())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let figures = match parse_figures(
            &visitors.get(),
            &transactions.get(),
            &units.get(),
            &revenue.get(),
            &hours.get(),
        ) {
            Ok(figures) => figures,
            Err(msg) => {
                set_error_message.set(Some(msg));
                return;
            }
        };
        // Same positivity rule the server enforces, checked before the round trip
        if let Err(e) = calculate_ratios(&figures) {
            set_error_message.set(Some(e.to_string()));
            return;
        }

        let date = entry_date.get();
        let employee = employee_id.get();
        if date.trim().is_empty() || employee.trim().is_empty() {
            set_error_message.set(Some("La fecha y la empleada son obligatorias".to_string()));
            return;
        }

        let token = match auth_state.get().access_token {
            Some(token) => token,
            None => return,
        };
        let editing_id = ui
            .editing_entry
            .get_untracked()
            .map(|e| e.base.id.value().to_string());

        set_is_saving.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            let result = match editing_id {
                Some(id) => {
                    let request = UpdateSaleEntryRequest {
                        entry_date: date,
                        employee_id: employee,
                        visitors: figures.visitors,
                        transactions: figures.transactions,
                        units: figures.units,
                        revenue: figures.revenue,
                        hours_worked: figures.hours_worked,
                    };
                    api::update_entry(&token, &id, &request).await.map(|_| ())
                }
                None => {
                    let request = CreateSaleEntryRequest {
                        entry_date: date,
                        employee_id: employee,
                        visitors: figures.visitors,
                        transactions: figures.transactions,
                        units: figures.units,
                        revenue: figures.revenue,
                        hours_worked: figures.hours_worked,
                    };
                    api::create_entry(&token, &request).await.map(|_| ())
                }
            };

            match result {
                Ok(()) => {
                    ui.notify_data_changed();
                    ui.close_entry_form();
                }
                Err(msg) => set_error_message.set(Some(msg)),
            }
            set_is_saving.set(false);
        });
    };

    let locale = LocaleFormat::es_es();
    let preview_view = move || {
        preview().map(|ratios| {
            view! {
                <div class="entry-form__preview">
                    <span>{format!("Conversión: {}", locale.format_percentage(ratios.conversion))}</span>
                    <span>{format!("Ticket medio: {}", locale.format_currency(ratios.ticket_medio))}</span>
                    <span>{format!("APO: {}", locale.format_number(ratios.apo, 2))}</span>
                    <span>{format!("PMV: {}", locale.format_currency(ratios.pmv))}</span>
                    <span>{format!("Productividad: {}/h", locale.format_currency(ratios.productividad))}</span>
                </div>
            }
        })
    };

    let employee_options = move || {
        employees
            .get()
            .into_iter()
            .map(|e| {
                let id = e.base.id.value().to_string();
                view! { <option value=id>{e.display_name}</option> }
            })
            .collect_view()
    };

    view! {
        <div class="modal-overlay" on:click=move |_| ui.close_entry_form()>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <h2>{if is_edit { "Editar venta" } else { "Nueva venta" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="entry-date">"Fecha"</label>
                        <input
                            type="date"
                            id="entry-date"
                            value=move || entry_date.get()
                            on:input=move |ev| set_entry_date.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="employee">"Empleada"</label>
                        <select
                            id="employee"
                            prop:value=move || employee_id.get()
                            on:change=move |ev| set_employee_id.set(event_target_value(&ev))
                        >
                            {employee_options}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="visitors">"Clientes"</label>
                        <input
                            type="number"
                            id="visitors"
                            min="1"
                            value=move || visitors.get()
                            on:input=move |ev| set_visitors.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="transactions">"Operaciones"</label>
                        <input
                            type="number"
                            id="transactions"
                            min="1"
                            value=move || transactions.get()
                            on:input=move |ev| set_transactions.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="units">"Unidades"</label>
                        <input
                            type="number"
                            id="units"
                            min="1"
                            value=move || units.get()
                            on:input=move |ev| set_units.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="revenue">"Venta (€)"</label>
                        <input
                            type="number"
                            id="revenue"
                            min="0.01"
                            step="0.01"
                            value=move || revenue.get()
                            on:input=move |ev| set_revenue.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-group">
                        <label for="hours">"Horas trabajadas"</label>
                        <input
                            type="number"
                            id="hours"
                            min="0.5"
                            step="0.5"
                            value=move || hours.get()
                            on:input=move |ev| set_hours.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    {preview_view}

                    <div class="modal__actions">
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| ui.close_entry_form()
                        >
                            "Cancelar"
                        </button>
                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_saving.get()
                        >
                            {move || if is_saving.get() { "Guardando..." } else { "Guardar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
