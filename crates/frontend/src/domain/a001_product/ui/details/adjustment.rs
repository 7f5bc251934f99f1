//! Модал брака/списания: два вида вычета, одна машина состояний.
//!
//! Правило верхней границы живёт в `contracts::domain::a003_stock_adjustment`;
//! здесь — только привязка к сигналам, вводу и сетевым вызовам.

use contracts::domain::a003_stock_adjustment::model::{
    AdjustmentDetails, AdjustmentKind, AdjustmentPayload, StockAdjustment,
};
use contracts::enums::writeoff_reason::WriteoffReason;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api;
use crate::shared::format::format_qty;

/// Форма вычета (брак или списание) в модале.
///
/// `saving` создаётся снаружи: тот же сигнал служит close-guard модала,
/// чтобы оверлей и Escape не закрыли форму во время запроса.
#[component]
pub fn AdjustmentModal(
    adjustment: StockAdjustment,
    /// Подпись строки остатка для заголовка
    stock_caption: String,
    is_fractional: bool,
    saving: RwSignal<bool>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let initial_quantity = adjustment
        .quantity
        .map(|q| format_qty(q, is_fractional))
        .unwrap_or_default();
    let kind = adjustment.kind();
    let is_edit = adjustment.is_edit();
    let available_cap = adjustment.available_cap;

    let draft = RwSignal::new(adjustment);
    let quantity_input = RwSignal::new(initial_quantity);
    let (error, set_error) = signal(None::<String>);

    let title = if is_edit {
        format!("{} — правка", kind.display_name())
    } else {
        format!("{} — новая запись", kind.display_name())
    };

    // Тихое ограничение при вводе; само по себе не заменяет validate()
    let handle_quantity_input = move |raw: String| {
        let trimmed = raw.trim().replace(',', ".");
        if trimmed.is_empty() {
            draft.update(|d| d.set_quantity(None));
            quantity_input.set(raw);
            return;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => {
                draft.update(|d| d.set_quantity(Some(value)));
                let clamped = draft.get_untracked().quantity.unwrap_or(value);
                if (clamped - value).abs() > f64::EPSILON {
                    quantity_input.set(format_qty(clamped, is_fractional));
                } else {
                    quantity_input.set(raw);
                }
            }
            Err(_) => {
                // нечисловой ввод оставляем в поле, количество считаем пустым
                draft.update(|d| d.set_quantity(None));
                quantity_input.set(raw);
            }
        }
    };

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let current = draft.get_untracked();
        // локальная проверка: при ошибке запрос не отправляется
        let payload = match current.payload() {
            Ok(payload) => payload,
            Err(validation) => {
                set_error.set(Some(validation.to_string()));
                return;
            }
        };

        saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match (payload, current.existing_id.clone()) {
                (AdjustmentPayload::Defect(payload), None) => {
                    api::create_defect(&current.stock_id, &payload).await
                }
                (AdjustmentPayload::Defect(payload), Some(id)) => {
                    api::update_defect(&id, &payload).await
                }
                (AdjustmentPayload::Writeoff(payload), None) => {
                    api::create_writeoff(&current.stock_id, &payload).await
                }
                (AdjustmentPayload::Writeoff(payload), Some(id)) => {
                    api::update_writeoff(&id, &payload).await
                }
            };

            saving.set(false);
            match result {
                Ok(()) => {
                    on_saved.run(());
                    on_close.run(());
                }
                Err(message) => {
                    // форма остаётся открытой, введённые значения на месте
                    set_error.set(Some(message));
                }
            }
        });
    };

    let delete = move |_| {
        if saving.get_untracked() {
            return;
        }
        let Some(existing_id) = draft.get_untracked().existing_id else {
            return;
        };
        let confirmed = web_sys::window()
            .map(|w| w.confirm_with_message("Удалить запись?").unwrap_or(false))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match kind {
                AdjustmentKind::Defect => api::remove_defect(&existing_id).await,
                AdjustmentKind::Writeoff => api::delete_writeoff(&existing_id).await,
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    on_saved.run(());
                    on_close.run(());
                }
                Err(message) => set_error.set(Some(message)),
            }
        });
    };

    view! {
        <div class="form form--adjustment" style="min-width: 420px; padding: var(--spacing-lg); display: flex; flex-direction: column; gap: var(--spacing-md);">
            <div class="page__header">
                <div>
                    <h2 class="page__title">{title}</h2>
                    <div style="color: var(--color-text-secondary); font-size: var(--font-size-sm);">
                        {stock_caption}
                    </div>
                </div>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=saving
                    on_click=move |_| on_close.run(())
                >
                    "✕"
                </Button>
            </div>

            {move || {
                error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="form__error" style="padding: var(--spacing-sm); background: var(--color-error-50); color: var(--color-error); border-radius: var(--radius-sm);">
                                {message}
                            </div>
                        }
                    })
            }}

            <label class="form__field">
                <span class="form__label">
                    {format!("Количество (доступно {})", format_qty(available_cap, is_fractional))}
                </span>
                <input
                    type="number"
                    min="0"
                    step=if is_fractional { "0.001" } else { "1" }
                    prop:value=move || quantity_input.get()
                    on:input=move |ev| handle_quantity_input(event_target_value(&ev))
                />
            </label>

            {match kind {
                AdjustmentKind::Defect => view! {
                    <label class="form__field">
                        <span class="form__label">"Причина"</span>
                        <textarea
                            rows="3"
                            prop:value=move || {
                                match &draft.get().details {
                                    AdjustmentDetails::Defect { reason } => reason.clone(),
                                    AdjustmentDetails::Writeoff { .. } => String::new(),
                                }
                            }
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| {
                                    if let AdjustmentDetails::Defect { reason } = &mut d.details {
                                        *reason = value;
                                    }
                                });
                            }
                        ></textarea>
                    </label>
                }
                .into_any(),
                AdjustmentKind::Writeoff => view! {
                    <div style="display: flex; flex-direction: column; gap: var(--spacing-sm);">
                        <label class="form__field">
                            <span class="form__label">"Причина"</span>
                            <select
                                prop:value=move || {
                                    match &draft.get().details {
                                        AdjustmentDetails::Writeoff { reason, .. } => {
                                            reason.code().to_string()
                                        }
                                        AdjustmentDetails::Defect { .. } => String::new(),
                                    }
                                }
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    if let Some(parsed) = WriteoffReason::from_code(&value) {
                                        draft.update(|d| {
                                            if let AdjustmentDetails::Writeoff { reason, .. } =
                                                &mut d.details
                                            {
                                                *reason = parsed;
                                            }
                                        });
                                    }
                                }
                            >
                                {WriteoffReason::all()
                                    .into_iter()
                                    .map(|reason| {
                                        view! {
                                            <option value=reason.code()>
                                                {reason.display_name()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="form__field">
                            <span class="form__label">"Уточнение"</span>
                            <input
                                type="text"
                                prop:value=move || {
                                    match &draft.get().details {
                                        AdjustmentDetails::Writeoff { reason_detail, .. } => {
                                            reason_detail.clone()
                                        }
                                        AdjustmentDetails::Defect { .. } => String::new(),
                                    }
                                }
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    draft.update(|d| {
                                        if let AdjustmentDetails::Writeoff {
                                            reason_detail, ..
                                        } = &mut d.details
                                        {
                                            *reason_detail = value;
                                        }
                                    });
                                }
                            />
                        </label>
                    </div>
                }
                .into_any(),
            }}

            <div style="display: flex; justify-content: space-between; align-items: center;">
                {is_edit
                    .then(|| {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Subtle
                                disabled=saving
                                on_click=delete
                            >
                                "Удалить"
                            </Button>
                        }
                    })}
                <div style="margin-left: auto; display: flex; gap: var(--spacing-sm);">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=saving
                        on_click=move |_| on_close.run(())
                    >
                        "Отмена"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary disabled=saving on_click=save>
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
