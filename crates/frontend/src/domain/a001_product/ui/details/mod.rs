//! Карточка остатков товара: проекция по точкам продаж, ленты партий,
//! оприходование, брак/списание, цены и журнал движений.

pub mod adjustment;
pub mod batch_form;
pub mod feed;
pub mod history;
pub mod price_editor;
pub mod view_model;

use std::sync::Arc;

use contracts::domain::a001_product::aggregate::LocationStock;
use contracts::domain::a002_stock_batch::aggregate::{Batch, StockLine};
use contracts::domain::a002_stock_batch::requests::BatchFilter;
use contracts::domain::a003_stock_adjustment::model::{AdjustmentKind, StockAdjustment};
use contracts::projections::p901_stock_movements::dto::MovementScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api;
use crate::shared::format::{format_date, format_qty};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;

use adjustment::AdjustmentModal;
use batch_form::BatchForm;
use history::MovementHistoryModal;
use price_editor::PriceEditor;
use view_model::ProductStockVm;

/// Открыть модал брака/списания; сигнал сохранения служит close-guard
fn open_adjustment(
    modals: ModalStackService,
    vm: ProductStockVm,
    adjustment: StockAdjustment,
    stock_caption: String,
    is_fractional: bool,
) {
    let saving = RwSignal::new(false);
    let guard: Arc<dyn Fn() -> bool + Send + Sync> =
        Arc::new(move || !saving.get_untracked());
    modals.push_guarded(Some(guard), move |handle| {
        let handle = handle.clone();
        view! {
            <AdjustmentModal
                adjustment=adjustment.clone()
                stock_caption=stock_caption.clone()
                is_fractional=is_fractional
                saving=saving
                on_saved=Callback::new(move |_| vm.refresh_after_mutation())
                on_close=Callback::new(move |_| handle.close())
            />
        }
        .into_any()
    });
}

/// Открыть журнал движений
fn open_history(modals: ModalStackService, scope: MovementScope, title: String, is_fractional: bool) {
    modals.push(move |handle| {
        let handle = handle.clone();
        view! {
            <MovementHistoryModal
                scope=scope.clone()
                title=title.clone()
                is_fractional=is_fractional
                on_close=Callback::new(move |_| handle.close())
            />
        }
        .into_any()
    });
}

/// Страница карточки остатков (корень: оркестратор проекции)
#[component]
pub fn ProductStockDetails(
    product_id: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProductStockVm::new(product_id);
    let modals = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        vm.load_product();
    });

    let open_batch_form = move |_| {
        let locations = vm.locations.get_untracked();
        if locations.is_empty() {
            return;
        }
        let product_id = vm.product_id.get_value();
        let saving = RwSignal::new(false);
        let guard: Arc<dyn Fn() -> bool + Send + Sync> =
            Arc::new(move || !saving.get_untracked());
        modals.push_guarded(Some(guard), move |handle| {
            let handle = handle.clone();
            view! {
                <BatchForm
                    product_id=product_id.clone()
                    locations=locations.clone()
                    saving=saving
                    on_saved=Callback::new(move |_| vm.refresh_after_mutation())
                    on_close=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        });
    };

    view! {
        <div class="page page--detail" id="a001_product--stock">
            <div class="page__header">
                <div class="page__header-left">
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        "← К списку"
                    </Button>
                    {move || {
                        let title = vm
                            .product
                            .get()
                            .map(|p| p.name)
                            .unwrap_or_else(|| "Товар".to_string());
                        view! { <h1 class="page__title">{title}</h1> }
                    }}
                </div>
                <div class="page__header-right" style="display: flex; gap: var(--spacing-sm); align-items: center;">
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        vm.set_location_filter(if value.is_empty() { None } else { Some(value) });
                    }>
                        <option value="">"Все точки"</option>
                        {move || {
                            let selected = vm.location_filter.get();
                            vm.location_options
                                .get()
                                .into_iter()
                                .map(|(id, name)| {
                                    let is_selected = selected.as_deref() == Some(id.as_str());
                                    view! {
                                        <option value=id selected=is_selected>{name}</option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.locations.get().is_empty())
                        on_click=open_batch_form
                    >
                        {icon("plus")}
                        "Оприходовать партию"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if vm.loading.get() {
                        return view! {
                            <Flex gap=FlexGap::Small style="align-items:center;padding:var(--spacing-4xl);justify-content:center;">
                                <Spinner />
                                <span>"Загрузка..."</span>
                            </Flex>
                        }
                        .into_any();
                    }
                    if let Some(message) = vm.error.get() {
                        // ошибка уровня страницы останавливает все зависимые блоки
                        return view! {
                            <div style="padding:var(--spacing-lg);background:var(--color-error-50);border:1px solid var(--color-error-100);border-radius:var(--radius-sm);color:var(--color-error);margin:var(--spacing-lg);">
                                <strong>"Ошибка: "</strong>{message}
                            </div>
                        }
                        .into_any();
                    }
                    let Some(product) = vm.product.get() else {
                        return view! { <div>"Нет данных"</div> }.into_any();
                    };
                    let unit = product.unit.clone();
                    let unit_card = unit.clone();
                    let is_fractional = product.is_fractional;
                    let min_step = product.quantity_step();

                    view! {
                        <div style="padding: var(--spacing-lg); display: flex; flex-direction: column; gap: var(--spacing-lg);">
                            <Card>
                                <div style="padding: var(--spacing-md); display: flex; gap: var(--spacing-xl); align-items: baseline;">
                                    {product
                                        .category
                                        .clone()
                                        .map(|category| {
                                            view! {
                                                <span style="color: var(--color-text-secondary);">
                                                    {category}
                                                </span>
                                            }
                                        })}
                                    <span>
                                        "Доступно: "
                                        <strong>
                                            {format!(
                                                "{} {}",
                                                format_qty(product.total_available, is_fractional),
                                                unit_card,
                                            )}
                                        </strong>
                                    </span>
                                    <span>
                                        "Брак: "
                                        <strong>
                                            {format!(
                                                "{} {}",
                                                format_qty(product.total_defect, is_fractional),
                                                unit_card,
                                            )}
                                        </strong>
                                    </span>
                                </div>
                            </Card>

                            {vm.locations
                                .get()
                                .into_iter()
                                .map(|location| {
                                    view! {
                                        <LocationSection
                                            vm=vm
                                            location=location
                                            unit=unit.clone()
                                            is_fractional=is_fractional
                                            min_step=min_step
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

/// Секция одной точки продаж: варианты с ценами и лента партий
#[component]
fn LocationSection(
    vm: ProductStockVm,
    location: LocationStock,
    unit: String,
    is_fractional: bool,
    min_step: f64,
) -> impl IntoView {
    let modals = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");
    let location_id = location.id.clone();
    let feed = vm.feed(&location_id);
    let location_name = location.name.clone();

    view! {
        <Card>
            <div style="padding: var(--spacing-md); display: flex; flex-direction: column; gap: var(--spacing-md);">
                <h2 style="margin: 0; font-size: var(--font-size-lg);">{location_name.clone()}</h2>

                <div class="table-wrapper">
                    <Table attr:style="width:100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Вариант"</TableHeaderCell>
                                <TableHeaderCell>"Доступно"</TableHeaderCell>
                                <TableHeaderCell>"Резерв"</TableHeaderCell>
                                <TableHeaderCell>"Брак"</TableHeaderCell>
                                <TableHeaderCell>"Цена и каналы"</TableHeaderCell>
                                <TableHeaderCell></TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {location
                                .variants
                                .iter()
                                .cloned()
                                .map(|variant| {
                                    let history_entry = variant
                                        .price_id
                                        .clone()
                                        .map(|price_id| (price_id, variant.name.clone()));
                                    let variant_name = variant.name.clone();
                                    let sku = variant.sku.clone();
                                    let available = variant.available_quantity;
                                    let reserved = variant.reserved_quantity;
                                    let defect = variant.defect_quantity;
                                    let location_id = location.id.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {variant_name.clone()}
                                                    {sku
                                                        .map(|sku| {
                                                            view! {
                                                                <span style="color: var(--color-text-secondary); margin-left: var(--spacing-xs); font-size: var(--font-size-sm);">
                                                                    {sku}
                                                                </span>
                                                            }
                                                        })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <strong style="font-variant-numeric: tabular-nums;">
                                                        {format_qty(available, is_fractional)}
                                                    </strong>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">
                                                        {format_qty(reserved, is_fractional)}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">
                                                        {format_qty(defect, is_fractional)}
                                                    </span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <PriceEditor
                                                        location_id=location_id
                                                        variant=variant
                                                        on_mutated=Callback::new(move |_| {
                                                            vm.refresh_after_mutation()
                                                        })
                                                    />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {history_entry
                                                        .map(|(price_id, name)| {
                                                            view! {
                                                                <button
                                                                    class="icon-button"
                                                                    title="Журнал движений"
                                                                    on:click=move |_| {
                                                                        open_history(
                                                                            modals,
                                                                            MovementScope::Price(price_id.clone()),
                                                                            name.clone(),
                                                                            is_fractional,
                                                                        )
                                                                    }
                                                                >
                                                                    {icon("history")}
                                                                </button>
                                                            }
                                                        })}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                </div>

                {feed
                    .map(|feed| {
                        let location_id = location_id.clone();
                        let load_more_id = location_id.clone();
                        let unit = unit.clone();
                        view! {
                            <div class="batch-feed" style="display: flex; flex-direction: column; gap: var(--spacing-sm);">
                                <div style="display: flex; gap: var(--spacing-sm); align-items: center;">
                                    <h3 style="margin: 0; font-size: var(--font-size-md);">"Партии"</h3>
                                    <select on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        if let Some(filter) = BatchFilter::from_code(&value) {
                                            // смена фильтра всегда перезапускает ленту с 1-й страницы
                                            vm.reload_feed(&location_id, Some(filter));
                                        }
                                    }>
                                        {BatchFilter::all()
                                            .into_iter()
                                            .map(|filter| {
                                                let selected = move || feed.get().filter == filter;
                                                view! {
                                                    <option value=filter.code() selected=selected>
                                                        {filter.display_name()}
                                                    </option>
                                                }
                                            })
                                            .collect_view()}
                                    </select>
                                    {move || {
                                        feed.get()
                                            .error
                                            .map(|message| {
                                                view! {
                                                    <span style="color: var(--color-error); font-size: var(--font-size-sm);">
                                                        {format!(
                                                            "{} — показаны ранее загруженные партии",
                                                            message,
                                                        )}
                                                    </span>
                                                }
                                            })
                                    }}
                                </div>

                                {move || {
                                    let state = feed.get();
                                    if state.batches.is_empty() && !state.is_loading() {
                                        return view! {
                                            <div style="color: var(--color-text-secondary);">
                                                "Партий по выбранному фильтру нет"
                                            </div>
                                        }
                                        .into_any();
                                    }
                                    state
                                        .batches
                                        .into_iter()
                                        .map(|batch| {
                                            view! {
                                                <BatchCard
                                                    vm=vm
                                                    batch=batch
                                                    unit=unit.clone()
                                                    is_fractional=is_fractional
                                                    min_step=min_step
                                                />
                                            }
                                        })
                                        .collect_view()
                                        .into_any()
                                }}

                                {move || {
                                    let state = feed.get();
                                    if state.is_loading() {
                                        view! {
                                            <Flex gap=FlexGap::Small style="align-items:center;">
                                                <Spinner />
                                                <span>"Загрузка..."</span>
                                            </Flex>
                                        }
                                        .into_any()
                                    } else if state.has_next() {
                                        let load_more_id = load_more_id.clone();
                                        view! {
                                            <Button
                                                appearance=ButtonAppearance::Secondary
                                                on_click=move |_| vm.load_more(&load_more_id)
                                            >
                                                {icon("chevron-down")}
                                                "Показать ещё"
                                            </Button>
                                        }
                                        .into_any()
                                    } else {
                                        view! { <></> }.into_any()
                                    }
                                }}
                            </div>
                        }
                    })}
            </div>
        </Card>
    }
}

/// Карточка одной партии со строками остатков и вычетами
#[component]
fn BatchCard(
    vm: ProductStockVm,
    batch: Batch,
    unit: String,
    is_fractional: bool,
    min_step: f64,
) -> impl IntoView {
    let modals = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    let caption = batch.caption();
    let supplier = batch.supplier.clone();
    let notes = batch.notes.clone();

    view! {
        <div class="batch-card" style="border: 1px solid var(--color-border); border-radius: var(--radius-sm); padding: var(--spacing-md); display: flex; flex-direction: column; gap: var(--spacing-sm);">
            <div style="display: flex; gap: var(--spacing-md); align-items: baseline;">
                <strong>{caption}</strong>
                {supplier
                    .map(|supplier| {
                        view! {
                            <span style="color: var(--color-text-secondary);">{supplier}</span>
                        }
                    })}
                {notes
                    .map(|notes| {
                        view! {
                            <span style="color: var(--color-text-secondary); font-size: var(--font-size-sm);">
                                {notes}
                            </span>
                        }
                    })}
            </div>

            {batch
                .stocks
                .iter()
                .cloned()
                .map(|stock| {
                    view! {
                        <StockLineBlock
                            vm=vm
                            stock=stock
                            unit=unit.clone()
                            is_fractional=is_fractional
                            min_step=min_step
                            modals=modals
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Строка остатка с действиями и списками вычетов
#[component]
fn StockLineBlock(
    vm: ProductStockVm,
    stock: StockLine,
    unit: String,
    is_fractional: bool,
    min_step: f64,
    modals: ModalStackService,
) -> impl IntoView {
    let caption = format!("{} · {}", stock.variant_name, unit);
    let stock_for_defect = stock.clone();
    let caption_for_defect = caption.clone();
    let stock_for_writeoff = stock.clone();
    let caption_for_writeoff = caption.clone();
    let stock_id_for_history = stock.id.clone();
    let history_title = stock.variant_name.clone();

    let defects = stock.defects.clone();
    let writeoffs = stock.writeoffs.clone();
    let stock_for_rows = stock.clone();

    view! {
        <div class="stock-line" style="display: flex; flex-direction: column; gap: var(--spacing-xs);">
            <div style="display: flex; gap: var(--spacing-md); align-items: baseline; flex-wrap: wrap;">
                <span style="min-width: 160px;">{stock.variant_name.clone()}</span>
                <span title="Поступило" style="font-variant-numeric: tabular-nums;">
                    {format!("Поступило {}", format_qty(stock.quantity, is_fractional))}
                </span>
                <strong title="Доступно" style="font-variant-numeric: tabular-nums;">
                    {format!("Доступно {}", format_qty(stock.available_quantity, is_fractional))}
                </strong>
                <span title="Резерв" style="font-variant-numeric: tabular-nums;">
                    {format!("Резерв {}", format_qty(stock.reserved_quantity, is_fractional))}
                </span>
                <span title="Продано" style="font-variant-numeric: tabular-nums;">
                    {format!("Продано {}", format_qty(stock.sold_quantity, is_fractional))}
                </span>
                <span title="Возвраты" style="font-variant-numeric: tabular-nums;">
                    {format!("Возвраты {}", format_qty(stock.returned_quantity, is_fractional))}
                </span>
                <span title="Брак" style="font-variant-numeric: tabular-nums;">
                    {format!("Брак {}", format_qty(stock.defect_quantity, is_fractional))}
                </span>
                <span title="Списано" style="font-variant-numeric: tabular-nums;">
                    {format!("Списано {}", format_qty(stock.writeoff_quantity, is_fractional))}
                </span>
                {(stock.inventory_adjustment != 0.0)
                    .then(|| {
                        let sign = if stock.inventory_adjustment > 0.0 { "излишек" } else { "недостача" };
                        view! {
                            <span title="Инвентаризация" style="font-variant-numeric: tabular-nums;">
                                {format!(
                                    "Инвент. {} ({})",
                                    format_qty(stock.inventory_adjustment.abs(), is_fractional),
                                    sign,
                                )}
                            </span>
                        }
                    })}

                <span style="margin-left: auto; display: inline-flex; gap: var(--spacing-xs);">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| {
                            open_adjustment(
                                modals,
                                vm,
                                StockAdjustment::for_create(
                                    &stock_for_defect,
                                    AdjustmentKind::Defect,
                                    min_step,
                                ),
                                caption_for_defect.clone(),
                                is_fractional,
                            )
                        }
                    >
                        "+ Брак"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| {
                            open_adjustment(
                                modals,
                                vm,
                                StockAdjustment::for_create(
                                    &stock_for_writeoff,
                                    AdjustmentKind::Writeoff,
                                    min_step,
                                ),
                                caption_for_writeoff.clone(),
                                is_fractional,
                            )
                        }
                    >
                        "+ Списание"
                    </Button>
                    <button
                        class="icon-button"
                        title="Журнал движений"
                        on:click=move |_| {
                            open_history(
                                modals,
                                MovementScope::Stock(stock_id_for_history.clone()),
                                history_title.clone(),
                                is_fractional,
                            )
                        }
                    >
                        {icon("history")}
                    </button>
                </span>
            </div>

            {(!defects.is_empty())
                .then(|| {
                    let stock = stock_for_rows.clone();
                    let caption = caption.clone();
                    view! {
                        <div style="margin-left: var(--spacing-lg); display: flex; flex-direction: column; gap: 2px;">
                            {defects
                                .into_iter()
                                .map(|defect| {
                                    let stock = stock.clone();
                                    let caption = caption.clone();
                                    let defect_id = defect.id.clone();
                                    let edit_defect = defect.clone();
                                    view! {
                                        <div style="display: flex; gap: var(--spacing-sm); align-items: center; font-size: var(--font-size-sm);">
                                            <span style="color: var(--color-text-secondary);">"Брак"</span>
                                            <span style="font-variant-numeric: tabular-nums;">
                                                {format_qty(defect.quantity, is_fractional)}
                                            </span>
                                            <span>{defect.reason.clone()}</span>
                                            {defect
                                                .created_at
                                                .map(|at| {
                                                    view! {
                                                        <span style="color: var(--color-text-secondary);">
                                                            {format_date(&at.to_rfc3339())}
                                                        </span>
                                                    }
                                                })}
                                            <button
                                                class="icon-button"
                                                title="Править"
                                                on:click=move |_| {
                                                    open_adjustment(
                                                        modals,
                                                        vm,
                                                        StockAdjustment::for_edit_defect(
                                                            &stock,
                                                            &edit_defect,
                                                            min_step,
                                                        ),
                                                        caption.clone(),
                                                        is_fractional,
                                                    )
                                                }
                                            >
                                                {icon("pencil")}
                                            </button>
                                            <button
                                                class="icon-button"
                                                title="Удалить"
                                                on:click=move |_| delete_defect(vm, defect_id.clone())
                                            >
                                                {icon("trash")}
                                            </button>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}

            {(!writeoffs.is_empty())
                .then(|| {
                    let stock = stock_for_rows.clone();
                    let caption = caption.clone();
                    view! {
                        <div style="margin-left: var(--spacing-lg); display: flex; flex-direction: column; gap: 2px;">
                            {writeoffs
                                .into_iter()
                                .map(|writeoff| {
                                    let stock = stock.clone();
                                    let caption = caption.clone();
                                    let transfer_locked = writeoff.is_transfer_locked();
                                    let transfer_number = writeoff
                                        .transfer
                                        .as_ref()
                                        .and_then(|t| t.number.clone());
                                    let writeoff_id = writeoff.id.clone();
                                    let edit_writeoff = writeoff.clone();
                                    view! {
                                        <div style="display: flex; gap: var(--spacing-sm); align-items: center; font-size: var(--font-size-sm);">
                                            <span style="color: var(--color-text-secondary);">"Списание"</span>
                                            <span style="font-variant-numeric: tabular-nums;">
                                                {format_qty(writeoff.quantity, is_fractional)}
                                            </span>
                                            <span>{writeoff.reason.display_name()}</span>
                                            {writeoff
                                                .reason_detail
                                                .clone()
                                                .map(|detail| {
                                                    view! {
                                                        <span style="color: var(--color-text-secondary);">
                                                            {detail}
                                                        </span>
                                                    }
                                                })}
                                            {if transfer_locked {
                                                // создано перемещением: правка и удаление недоступны
                                                view! {
                                                    <span
                                                        title="Создано перемещением — управляется подсистемой перемещений"
                                                        style="display: inline-flex; gap: 2px; align-items: center; color: var(--color-text-secondary);"
                                                    >
                                                        {icon("lock")}
                                                        {transfer_number
                                                            .map(|n| format!("Перемещение {}", n))
                                                            .unwrap_or_else(|| "Перемещение".to_string())}
                                                    </span>
                                                }
                                                .into_any()
                                            } else {
                                                view! {
                                                    <span style="display: inline-flex; gap: 2px;">
                                                        <button
                                                            class="icon-button"
                                                            title="Править"
                                                            on:click=move |_| {
                                                                open_adjustment(
                                                                    modals,
                                                                    vm,
                                                                    StockAdjustment::for_edit_writeoff(
                                                                        &stock,
                                                                        &edit_writeoff,
                                                                        min_step,
                                                                    ),
                                                                    caption.clone(),
                                                                    is_fractional,
                                                                )
                                                            }
                                                        >
                                                            {icon("pencil")}
                                                        </button>
                                                        <button
                                                            class="icon-button"
                                                            title="Удалить"
                                                            on:click=move |_| {
                                                                delete_writeoff(vm, writeoff_id.clone())
                                                            }
                                                        >
                                                            {icon("trash")}
                                                        </button>
                                                    </span>
                                                }
                                                .into_any()
                                            }}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })}
        </div>
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .map(|w| w.confirm_with_message(message).unwrap_or(false))
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Удаление брака из строки списка (с подтверждением)
fn delete_defect(vm: ProductStockVm, defect_id: String) {
    if !confirm("Удалить запись о браке?") {
        return;
    }
    spawn_local(async move {
        match api::remove_defect(&defect_id).await {
            Ok(()) => vm.refresh_after_mutation(),
            Err(message) => alert(&message),
        }
    });
}

/// Удаление списания из строки списка (с подтверждением)
fn delete_writeoff(vm: ProductStockVm, writeoff_id: String) {
    if !confirm("Удалить списание?") {
        return;
    }
    spawn_local(async move {
        match api::delete_writeoff(&writeoff_id).await {
            Ok(()) => vm.refresh_after_mutation(),
            Err(message) => alert(&message),
        }
    });
}
