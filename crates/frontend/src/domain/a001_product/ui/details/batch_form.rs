//! Оприходование партии: динамическая форма строк по парам (вариант, точка).
//!
//! Черновик (`BatchDraft`) отделён от сигналов: все правила — добавление и
//! удаление строк, сброс варианта при смене точки, запрет вариантов без цены,
//! предполётная проверка — проверяются unit-тестами.

use contracts::domain::a001_product::aggregate::LocationStock;
use contracts::domain::a002_stock_batch::requests::{CreateBatchPayload, NewStockPayload};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a001_product::api;
use crate::shared::icons::icon;

/// Строка черновика поступления
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub id: Uuid,
    pub location_id: String,
    pub variant_on_location_id: String,
    /// Числовые поля держим «сырыми» строками до проверки
    pub quantity: String,
    pub cost_price: String,
    pub reserved_quantity: String,
    pub is_available_for_sale: bool,
    pub is_active_on_marketplace: bool,
    pub is_active_for_offline_sale: bool,
    pub is_active_on_own_site: bool,
}

impl DraftLine {
    fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            location_id: String::new(),
            variant_on_location_id: String::new(),
            quantity: String::new(),
            cost_price: String::new(),
            reserved_quantity: String::new(),
            is_available_for_sale: true,
            is_active_on_marketplace: false,
            is_active_for_offline_sale: false,
            is_active_on_own_site: false,
        }
    }
}

/// Черновик партии: шапка документа и строки поступления
#[derive(Debug, Clone)]
pub struct BatchDraft {
    pub batch_number: String,
    pub received_date: String,
    pub supplier: String,
    pub notes: String,
    pub lines: Vec<DraftLine>,
}

fn opt(v: &str) -> Option<String> {
    let trimmed = v.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_optional_number(raw: &str, label: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("Неверное число в поле «{}»", label))
}

pub const LINE_ERROR: &str = "Укажите точку, вариант и количество в каждой строке";

impl BatchDraft {
    pub fn new(today: &str) -> Self {
        Self {
            batch_number: String::new(),
            received_date: today.to_string(),
            supplier: String::new(),
            notes: String::new(),
            lines: vec![DraftLine::blank()],
        }
    }

    pub fn add_line(&mut self) {
        self.lines.push(DraftLine::blank());
    }

    /// Удаление последней оставшейся строки заменяет её пустой:
    /// форма никогда не остаётся без строк
    pub fn remove_line(&mut self, line_id: Uuid) {
        self.lines.retain(|l| l.id != line_id);
        if self.lines.is_empty() {
            self.lines.push(DraftLine::blank());
        }
    }

    pub fn line_mut(&mut self, line_id: Uuid) -> Option<&mut DraftLine> {
        self.lines.iter_mut().find(|l| l.id == line_id)
    }

    /// Смена точки сбрасывает выбранный вариант: набор вариантов зависит от точки
    pub fn set_location(&mut self, line_id: Uuid, location_id: &str) {
        if let Some(line) = self.line_mut(line_id) {
            line.location_id = location_id.to_string();
            line.variant_on_location_id = String::new();
        }
    }

    /// Выбор варианта. Вариант без назначенной цены оприходовать нельзя —
    /// выбор отклоняется с предупреждением. Флаги каналов наследуются от
    /// текущего состояния варианта.
    pub fn set_variant(
        &mut self,
        line_id: Uuid,
        variant_on_location_id: &str,
        locations: &[LocationStock],
    ) -> Result<(), String> {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) else {
            return Ok(());
        };
        if variant_on_location_id.is_empty() {
            line.variant_on_location_id = String::new();
            return Ok(());
        }

        let variant = locations
            .iter()
            .find(|loc| loc.id == line.location_id)
            .and_then(|loc| loc.variant(variant_on_location_id));
        let Some(variant) = variant else {
            return Err("Вариант не найден на выбранной точке".to_string());
        };
        if !variant.has_price() {
            return Err(format!(
                "У варианта «{}» нет цены на этой точке — сначала назначьте цену",
                variant.name
            ));
        }

        line.variant_on_location_id = variant_on_location_id.to_string();
        line.is_available_for_sale = variant.is_price_active;
        line.is_active_on_marketplace = variant.is_active_on_marketplace;
        line.is_active_for_offline_sale = variant.is_active_for_offline_sale;
        line.is_active_on_own_site = variant.is_active_on_own_site;
        Ok(())
    }

    /// Предполётная проверка: при ошибке запрос к серверу не выполняется
    pub fn validate(&self, locations: &[LocationStock]) -> Result<CreateBatchPayload, String> {
        if self.lines.is_empty() {
            return Err("Добавьте хотя бы одну строку".to_string());
        }

        let mut stocks = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.location_id.is_empty() || line.variant_on_location_id.is_empty() {
                return Err(LINE_ERROR.to_string());
            }
            let variant = locations
                .iter()
                .find(|loc| loc.id == line.location_id)
                .and_then(|loc| loc.variant(&line.variant_on_location_id));
            let Some(variant) = variant else {
                return Err(LINE_ERROR.to_string());
            };
            if !variant.has_price() {
                return Err(format!(
                    "У варианта «{}» нет цены — оприходование невозможно",
                    variant.name
                ));
            }

            let quantity = parse_optional_number(&line.quantity, "Количество")?.unwrap_or(0.0);
            if quantity <= 0.0 {
                return Err(LINE_ERROR.to_string());
            }

            stocks.push(NewStockPayload {
                variant_on_location_id: line.variant_on_location_id.clone(),
                quantity,
                cost_price: parse_optional_number(&line.cost_price, "Закупочная цена")?,
                reserved_quantity: parse_optional_number(&line.reserved_quantity, "Резерв")?,
                is_available_for_sale: line.is_available_for_sale,
                is_active_on_marketplace: line.is_active_on_marketplace,
                is_active_for_offline_sale: line.is_active_for_offline_sale,
                is_active_on_own_site: line.is_active_on_own_site,
            });
        }

        Ok(CreateBatchPayload {
            batch_number: opt(&self.batch_number),
            received_date: opt(&self.received_date),
            supplier: opt(&self.supplier),
            notes: opt(&self.notes),
            stocks,
        })
    }
}

/// Форма оприходования партии (в модале)
#[component]
pub fn BatchForm(
    product_id: String,
    /// Снимок разреза по точкам на момент открытия формы
    locations: Vec<LocationStock>,
    /// Создаётся снаружи: этот же сигнал служит close-guard модала
    saving: RwSignal<bool>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let draft = RwSignal::new(BatchDraft::new(&today));
    let (error, set_error) = signal(None::<String>);

    let product_id = StoredValue::new(product_id);
    let locations = StoredValue::new(locations);

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let payload = locations.with_value(|locs| draft.get_untracked().validate(locs));
        let payload = match payload {
            Ok(p) => p,
            Err(message) => {
                // проверка не пройдена — запрос не отправляем
                set_error.set(Some(message));
                return;
            }
        };

        saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::create_batch(&product_id.get_value(), &payload).await {
                Ok(()) => {
                    saving.set(false);
                    on_saved.run(());
                    on_close.run(());
                }
                Err(message) => {
                    // ошибка сервера — как есть, значения формы не теряем
                    saving.set(false);
                    set_error.set(Some(message));
                }
            }
        });
    };

    view! {
        <div class="form form--batch" style="min-width: 720px; padding: var(--spacing-lg); display: flex; flex-direction: column; gap: var(--spacing-md);">
            <div class="page__header">
                <h2 class="page__title">"Оприходование партии"</h2>
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

            <div style="display: grid; grid-template-columns: repeat(4, 1fr); gap: var(--spacing-sm);">
                <label class="form__field">
                    <span class="form__label">"Номер партии"</span>
                    <input
                        type="text"
                        placeholder="назначит сервер"
                        prop:value=move || draft.get().batch_number
                        on:input=move |ev| draft.update(|d| d.batch_number = event_target_value(&ev))
                    />
                </label>
                <label class="form__field">
                    <span class="form__label">"Дата поступления"</span>
                    <input
                        type="date"
                        prop:value=move || draft.get().received_date
                        on:input=move |ev| draft.update(|d| d.received_date = event_target_value(&ev))
                    />
                </label>
                <label class="form__field">
                    <span class="form__label">"Поставщик"</span>
                    <input
                        type="text"
                        prop:value=move || draft.get().supplier
                        on:input=move |ev| draft.update(|d| d.supplier = event_target_value(&ev))
                    />
                </label>
                <label class="form__field">
                    <span class="form__label">"Примечание"</span>
                    <input
                        type="text"
                        prop:value=move || draft.get().notes
                        on:input=move |ev| draft.update(|d| d.notes = event_target_value(&ev))
                    />
                </label>
            </div>

            <div class="table-wrapper">
                <table style="width: 100%;">
                    <thead>
                        <tr>
                            <th>"Точка"</th>
                            <th>"Вариант"</th>
                            <th>"Кол-во"</th>
                            <th>"Закуп. цена"</th>
                            <th>"Резерв"</th>
                            <th>"Каналы"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || draft.get().lines
                            key=|line| line.id
                            children=move |line| {
                                let line_id = line.id;
                                view! {
                                    <BatchFormLine
                                        line=line
                                        draft=draft
                                        locations=locations
                                        on_warn=Callback::new(move |message: String| {
                                            set_error.set(Some(message))
                                        })
                                        on_remove=Callback::new(move |_| {
                                            draft.update(|d| d.remove_line(line_id))
                                        })
                                    />
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <div style="display: flex; justify-content: space-between; align-items: center;">
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| draft.update(|d| d.add_line())
                >
                    {icon("plus")}
                    "Добавить строку"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=save
                >
                    {move || if saving.get() { "Сохранение..." } else { "Оприходовать" }}
                </Button>
            </div>
        </div>
    }
}

#[component]
fn BatchFormLine(
    line: DraftLine,
    draft: RwSignal<BatchDraft>,
    locations: StoredValue<Vec<LocationStock>>,
    #[prop(into)] on_warn: Callback<String>,
    #[prop(into)] on_remove: Callback<()>,
) -> impl IntoView {
    let line_id = line.id;

    let variant_options = move || {
        let location_id = draft
            .get()
            .lines
            .iter()
            .find(|l| l.id == line_id)
            .map(|l| l.location_id.clone())
            .unwrap_or_default();
        locations.with_value(|locs| {
            locs.iter()
                .find(|loc| loc.id == location_id)
                .map(|loc| {
                    loc.variants
                        .iter()
                        .map(|v| (v.id.clone(), v.name.clone(), v.has_price()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    let field = move |pick: fn(&DraftLine) -> String| {
        draft
            .get()
            .lines
            .iter()
            .find(|l| l.id == line_id)
            .map(pick)
            .unwrap_or_default()
    };
    let flag = move |pick: fn(&DraftLine) -> bool| {
        draft
            .get()
            .lines
            .iter()
            .find(|l| l.id == line_id)
            .map(pick)
            .unwrap_or(false)
    };

    view! {
        <tr>
            <td>
                <select
                    prop:value=move || field(|l| l.location_id.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.set_location(line_id, &value));
                    }
                >
                    <option value="">"— точка —"</option>
                    {locations.with_value(|locs| {
                        locs.iter()
                            .map(|loc| {
                                let id = loc.id.clone();
                                let name = loc.name.clone();
                                view! { <option value=id>{name}</option> }
                            })
                            .collect_view()
                    })}
                </select>
            </td>
            <td>
                <select
                    prop:value=move || field(|l| l.variant_on_location_id.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let result = locations.with_value(|locs| {
                            let mut out = Ok(());
                            draft.update(|d| out = d.set_variant(line_id, &value, locs));
                            out
                        });
                        if let Err(message) = result {
                            on_warn.run(message);
                        }
                    }
                >
                    <option value="">"— вариант —"</option>
                    {move || {
                        variant_options()
                            .into_iter()
                            .map(|(id, name, has_price)| {
                                let label = if has_price {
                                    name
                                } else {
                                    format!("{} (без цены)", name)
                                };
                                view! { <option value=id>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td>
                <input
                    type="number"
                    min="0"
                    style="width: 80px;"
                    prop:value=move || field(|l| l.quantity.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| {
                            if let Some(l) = d.line_mut(line_id) {
                                l.quantity = value;
                            }
                        });
                    }
                />
            </td>
            <td>
                <input
                    type="number"
                    min="0"
                    style="width: 90px;"
                    prop:value=move || field(|l| l.cost_price.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| {
                            if let Some(l) = d.line_mut(line_id) {
                                l.cost_price = value;
                            }
                        });
                    }
                />
            </td>
            <td>
                <input
                    type="number"
                    min="0"
                    style="width: 80px;"
                    prop:value=move || field(|l| l.reserved_quantity.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| {
                            if let Some(l) = d.line_mut(line_id) {
                                l.reserved_quantity = value;
                            }
                        });
                    }
                />
            </td>
            <td>
                <div style="display: flex; gap: var(--spacing-sm); white-space: nowrap;">
                    <label title="Доступен к продаже">
                        <input
                            type="checkbox"
                            prop:checked=move || flag(|l| l.is_available_for_sale)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                draft.update(|d| {
                                    if let Some(l) = d.line_mut(line_id) {
                                        l.is_available_for_sale = checked;
                                    }
                                });
                            }
                        />
                        "Продажа"
                    </label>
                    <label title="Маркетплейс">
                        <input
                            type="checkbox"
                            prop:checked=move || flag(|l| l.is_active_on_marketplace)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                draft.update(|d| {
                                    if let Some(l) = d.line_mut(line_id) {
                                        l.is_active_on_marketplace = checked;
                                    }
                                });
                            }
                        />
                        "МП"
                    </label>
                    <label title="Офлайн-продажи">
                        <input
                            type="checkbox"
                            prop:checked=move || flag(|l| l.is_active_for_offline_sale)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                draft.update(|d| {
                                    if let Some(l) = d.line_mut(line_id) {
                                        l.is_active_for_offline_sale = checked;
                                    }
                                });
                            }
                        />
                        "Офлайн"
                    </label>
                    <label title="Собственный сайт">
                        <input
                            type="checkbox"
                            prop:checked=move || flag(|l| l.is_active_on_own_site)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                draft.update(|d| {
                                    if let Some(l) = d.line_mut(line_id) {
                                        l.is_active_on_own_site = checked;
                                    }
                                });
                            }
                        />
                        "Сайт"
                    </label>
                </div>
            </td>
            <td>
                <button
                    class="icon-button"
                    title="Удалить строку"
                    on:click=move |_| on_remove.run(())
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::VariantOnLocation;

    fn variant(id: &str, name: &str, price_id: Option<&str>) -> VariantOnLocation {
        VariantOnLocation {
            id: id.into(),
            variant_id: format!("v-{id}"),
            name: name.into(),
            sku: None,
            price: price_id.map(|_| 990.0),
            price_id: price_id.map(String::from),
            is_price_active: true,
            is_active_on_marketplace: true,
            is_active_for_offline_sale: false,
            is_active_on_own_site: false,
            available_quantity: 4.0,
            reserved_quantity: 0.0,
            defect_quantity: 0.0,
        }
    }

    fn locations() -> Vec<LocationStock> {
        vec![LocationStock {
            id: "loc-1".into(),
            name: "Основной склад".into(),
            variants: vec![
                variant("vl-1", "Размер M", Some("p-1")),
                variant("vl-2", "Размер L", None),
            ],
        }]
    }

    #[test]
    fn test_remove_last_line_leaves_blank() {
        let mut draft = BatchDraft::new("2026-08-07");
        let only_line = draft.lines[0].id;
        draft.remove_line(only_line);
        assert_eq!(draft.lines.len(), 1);
        assert_ne!(draft.lines[0].id, only_line);
        assert!(draft.lines[0].location_id.is_empty());
    }

    #[test]
    fn test_location_change_resets_variant() {
        let mut draft = BatchDraft::new("2026-08-07");
        let line_id = draft.lines[0].id;
        draft.set_location(line_id, "loc-1");
        draft
            .set_variant(line_id, "vl-1", &locations())
            .expect("priced variant");
        assert_eq!(draft.lines[0].variant_on_location_id, "vl-1");

        draft.set_location(line_id, "loc-2");
        assert!(draft.lines[0].variant_on_location_id.is_empty());
    }

    #[test]
    fn test_variant_without_price_is_rejected() {
        let mut draft = BatchDraft::new("2026-08-07");
        let line_id = draft.lines[0].id;
        draft.set_location(line_id, "loc-1");
        let err = draft.set_variant(line_id, "vl-2", &locations()).unwrap_err();
        assert!(err.contains("нет цены"));
        assert!(draft.lines[0].variant_on_location_id.is_empty());
    }

    #[test]
    fn test_variant_seeds_channel_flags() {
        let mut draft = BatchDraft::new("2026-08-07");
        let line_id = draft.lines[0].id;
        draft.set_location(line_id, "loc-1");
        draft.set_variant(line_id, "vl-1", &locations()).unwrap();
        assert!(draft.lines[0].is_active_on_marketplace);
        assert!(!draft.lines[0].is_active_for_offline_sale);
    }

    // Сценарий: две строки, во второй не выбран вариант — отправка блокируется
    #[test]
    fn test_validate_blocks_incomplete_line() {
        let locs = locations();
        let mut draft = BatchDraft::new("2026-08-07");
        let first = draft.lines[0].id;
        draft.set_location(first, "loc-1");
        draft.set_variant(first, "vl-1", &locs).unwrap();
        draft.line_mut(first).unwrap().quantity = "5".into();

        draft.add_line();
        let second = draft.lines[1].id;
        draft.set_location(second, "loc-1");
        // вариант не выбран

        assert_eq!(draft.validate(&locs).unwrap_err(), LINE_ERROR);
    }

    #[test]
    fn test_validate_requires_positive_quantity() {
        let locs = locations();
        let mut draft = BatchDraft::new("2026-08-07");
        let line_id = draft.lines[0].id;
        draft.set_location(line_id, "loc-1");
        draft.set_variant(line_id, "vl-1", &locs).unwrap();
        draft.line_mut(line_id).unwrap().quantity = "0".into();
        assert_eq!(draft.validate(&locs).unwrap_err(), LINE_ERROR);
    }

    #[test]
    fn test_validate_builds_payload() {
        let locs = locations();
        let mut draft = BatchDraft::new("2026-08-07");
        draft.supplier = "ООО Ромашка".into();
        let line_id = draft.lines[0].id;
        draft.set_location(line_id, "loc-1");
        draft.set_variant(line_id, "vl-1", &locs).unwrap();
        {
            let line = draft.line_mut(line_id).unwrap();
            line.quantity = "5".into();
            line.cost_price = "120,50".into();
        }

        let payload = draft.validate(&locs).unwrap();
        assert_eq!(payload.received_date.as_deref(), Some("2026-08-07"));
        assert_eq!(payload.supplier.as_deref(), Some("ООО Ромашка"));
        assert_eq!(payload.batch_number, None);
        assert_eq!(payload.stocks.len(), 1);
        let stock = &payload.stocks[0];
        assert_eq!(stock.variant_on_location_id, "vl-1");
        assert_eq!(stock.quantity, 5.0);
        assert_eq!(stock.cost_price, Some(120.5));
        assert_eq!(stock.reserved_quantity, None);
        assert!(stock.is_active_on_marketplace);
    }
}
