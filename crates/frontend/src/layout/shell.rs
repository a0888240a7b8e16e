use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d400_period_summary::ui::PeriodSummaryTab;
use crate::domain::a001_sale_entry::ui::daily_ledger::DailyLedgerTab;
use crate::domain::a001_sale_entry::ui::entry_form::EntryFormModal;
use crate::domain::a001_sale_entry::ui::last_sale::LastSaleTab;
use crate::layout::context::{use_ui, ActiveTab};
use crate::system::auth::context::{do_logout, use_auth};

#[component]
fn TabButton(label: &'static str, tab: ActiveTab) -> impl IntoView {
    let ui = use_ui();
    let class = move || {
        if ui.active_tab.get() == tab {
            "tab-button tab-button--active"
        } else {
            "tab-button"
        }
    };

    view! {
        <button class=class on:click=move |_| ui.active_tab.set(tab)>
            {label}
        </button>
    }
}

#[component]
pub fn Shell() -> impl IntoView {
    let ui = use_ui();
    let (auth_state, set_auth_state) = use_auth();

    let user_name = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.display_name.unwrap_or(u.username))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    let content = move || match ui.active_tab.get() {
        ActiveTab::DailyLedger => view! { <DailyLedgerTab /> }.into_any(),
        ActiveTab::LastSale => view! { <LastSaleTab /> }.into_any(),
        ActiveTab::Summary => view! { <PeriodSummaryTab /> }.into_any(),
    };

    view! {
        <div class="shell">
            <header class="shell__header">
                <h1>"Seguimiento de Ventas"</h1>
                <div class="shell__user">
                    <span>{user_name}</span>
                    <button class="btn-link" on:click=on_logout>"Salir"</button>
                </div>
            </header>

            <nav class="shell__tabs">
                <TabButton label="Registro Diario" tab=ActiveTab::DailyLedger />
                <TabButton label="Última Venta" tab=ActiveTab::LastSale />
                <TabButton label="Resumen" tab=ActiveTab::Summary />
            </nav>

            <main class="shell__content">{content}</main>

            <button class="fab" title="Nueva venta" on:click=move |_| ui.open_new_entry()>
                "+"
            </button>

            <Show when=move || ui.entry_form_open.get()>
                <EntryFormModal />
            </Show>
        </div>
    }
}
