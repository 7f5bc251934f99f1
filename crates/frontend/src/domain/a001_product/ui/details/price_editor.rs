//! Цена и флаги активности пары (вариант, точка).
//!
//! Сервер предоставляет один идемпотентный create-or-replace вызов; он же
//! используется и для назначения цены, и для переключения отдельных флагов.
//! Переключатели применяются оптимистично, с откатом к прежнему значению
//! при ошибке; правка самой цены, напротив, завершается полным refresh.

use contracts::domain::a001_product::aggregate::VariantOnLocation;
use contracts::domain::a001_product::requests::UpsertPricePayload;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api;
use crate::shared::format::format_money;

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Встроенный редактор цены и каналов продаж одной пары (вариант, точка)
#[component]
pub fn PriceEditor(
    location_id: String,
    /// Снимок варианта на момент последнего refresh
    variant: VariantOnLocation,
    #[prop(into)] on_mutated: Callback<()>,
) -> impl IntoView {
    let has_price = variant.has_price();
    let can_toggle = variant.can_toggle_channels();
    let current_price = variant.price;

    // локальные копии флагов — единственное место с оптимистичной мутацией
    let is_active = RwSignal::new(variant.is_price_active);
    let on_marketplace = RwSignal::new(variant.is_active_on_marketplace);
    let for_offline = RwSignal::new(variant.is_active_for_offline_sale);
    let on_own_site = RwSignal::new(variant.is_active_on_own_site);

    let (editing, set_editing) = signal(false);
    let price_input = RwSignal::new(
        current_price
            .map(|p| format_money(p))
            .unwrap_or_default(),
    );
    // одиночный полёт на весь блок: свой запрос блокирует только свои контролы
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let variant = StoredValue::new(variant);
    let location_id = StoredValue::new(location_id);

    let build_payload = move |selling_price: f64| UpsertPricePayload {
        variant_id: variant.with_value(|v| v.variant_id.clone()),
        location_id: location_id.get_value(),
        selling_price,
        is_active: is_active.get_untracked(),
        is_active_on_marketplace: Some(on_marketplace.get_untracked()),
        is_active_for_offline_sale: Some(for_offline.get_untracked()),
        is_active_on_own_site: Some(on_own_site.get_untracked()),
    };

    let save_price = move |_| {
        if busy.get_untracked() {
            return;
        }
        let raw = price_input.get_untracked();
        let parsed = raw.trim().replace(',', ".").parse::<f64>();
        let selling_price = match parsed {
            Ok(value) if value >= 0.0 => value,
            _ => {
                set_error.set(Some("Укажите цену числом".to_string()));
                return;
            }
        };

        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::upsert_price(&build_payload(selling_price)).await {
                Ok(()) => {
                    set_busy.set(false);
                    set_editing.set(false);
                    // цена изменилась — перечитываем проекцию целиком
                    on_mutated.run(());
                }
                Err(message) => {
                    set_busy.set(false);
                    set_error.set(Some(message));
                }
            }
        });
    };

    // Оптимистичное переключение флага с откатом при ошибке
    let toggle = move |flag: RwSignal<bool>| {
        if busy.get_untracked() {
            return;
        }
        let Some(selling_price) = current_price else {
            return;
        };
        let previous = flag.get_untracked();
        flag.set(!previous);

        set_busy.set(true);
        spawn_local(async move {
            match api::upsert_price(&build_payload(selling_price)).await {
                Ok(()) => set_busy.set(false),
                Err(message) => {
                    // откат к значению до переключения
                    flag.set(previous);
                    set_busy.set(false);
                    alert(&message);
                }
            }
        });
    };

    view! {
        <div class="price-editor" style="display: flex; align-items: center; gap: var(--spacing-sm); flex-wrap: wrap;">
            {move || {
                if editing.get() {
                    view! {
                        <span style="display: inline-flex; gap: var(--spacing-xs); align-items: center;">
                            <input
                                type="number"
                                min="0"
                                style="width: 100px;"
                                prop:value=move || price_input.get()
                                on:input=move |ev| price_input.set(event_target_value(&ev))
                            />
                            <Button
                                appearance=ButtonAppearance::Primary
                                size=ButtonSize::Small
                                disabled=busy
                                on_click=save_price
                            >
                                "ОК"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                disabled=busy
                                on_click=move |_| {
                                    set_editing.set(false);
                                    set_error.set(None);
                                }
                            >
                                "Отмена"
                            </Button>
                        </span>
                    }
                    .into_any()
                } else {
                    let label = current_price
                        .map(|p| format_money(p))
                        .unwrap_or_else(|| "—".to_string());
                    let action = if has_price { "Изменить" } else { "Назначить цену" };
                    view! {
                        <span style="display: inline-flex; gap: var(--spacing-xs); align-items: baseline;">
                            <strong style="font-variant-numeric: tabular-nums;">{label}</strong>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| set_editing.set(true)
                            >
                                {action}
                            </Button>
                        </span>
                    }
                    .into_any()
                }
            }}

            {move || {
                error
                    .get()
                    .map(|message| {
                        view! {
                            <span style="color: var(--color-error); font-size: var(--font-size-sm);">
                                {message}
                            </span>
                        }
                    })
            }}

            {has_price
                .then(|| {
                    view! {
                        <span style="display: inline-flex; gap: var(--spacing-sm); white-space: nowrap;">
                            <label title="Цена активна">
                                <input
                                    type="checkbox"
                                    prop:checked=move || is_active.get()
                                    disabled=move || busy.get()
                                    on:change=move |_| toggle(is_active)
                                />
                                "Активна"
                            </label>
                            // при нулевом остатке продавать нечего — каналы выключены
                            <label title="Маркетплейс">
                                <input
                                    type="checkbox"
                                    prop:checked=move || on_marketplace.get()
                                    disabled=move || busy.get() || !can_toggle
                                    on:change=move |_| toggle(on_marketplace)
                                />
                                "МП"
                            </label>
                            <label title="Офлайн-продажи">
                                <input
                                    type="checkbox"
                                    prop:checked=move || for_offline.get()
                                    disabled=move || busy.get() || !can_toggle
                                    on:change=move |_| toggle(for_offline)
                                />
                                "Офлайн"
                            </label>
                            <label title="Собственный сайт">
                                <input
                                    type="checkbox"
                                    prop:checked=move || on_own_site.get()
                                    disabled=move || busy.get() || !can_toggle
                                    on:change=move |_| toggle(on_own_site)
                                />
                                "Сайт"
                            </label>
                        </span>
                    }
                })}
        </div>
    }
}
