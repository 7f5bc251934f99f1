//! Список товаров каталога — точка входа в карточку остатков.
//! Намеренно тонкий экран: поиск, страницы, переход в карточку.

pub mod state;

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a001_product::requests::ProductsQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api;
use crate::shared::format::format_qty;

use state::create_state;

#[component]
pub fn ProductListPage(#[prop(into)] on_open: Callback<String>) -> impl IntoView {
    let list_state = create_state();
    let (items, set_items) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move |page: u32| {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        let current = list_state.get_untracked();
        let q = current.q.trim().to_string();
        let query = ProductsQuery {
            q: if q.is_empty() { None } else { Some(q) },
            page,
            page_size: current.page_size,
        };

        spawn_local(async move {
            match api::fetch_products(&query).await {
                Ok(response) => {
                    set_items.set(response.items);
                    list_state.update(|s| {
                        s.page = response.pagination.current_page.max(1);
                        s.total_count = response.pagination.total_count;
                        s.total_pages = response.pagination.total_pages;
                        s.is_loaded = true;
                    });
                }
                Err(message) => {
                    log::error!("список товаров: {message}");
                    set_error.set(Some(message));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load(1);
    });

    view! {
        <div class="page" id="a001_product--list">
            <div class="page__header">
                <h1 class="page__title">"Товары"</h1>
                <div style="display: flex; gap: var(--spacing-sm); align-items: center;">
                    <input
                        type="text"
                        placeholder="Поиск по названию или артикулу..."
                        style="width: 260px;"
                        prop:value=move || list_state.get().q
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            list_state.update(|s| s.q = value);
                        }
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                load(1);
                            }
                        }
                    />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load(1)>
                        "Найти"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if loading.get() {
                        return view! {
                            <Flex gap=FlexGap::Small style="align-items:center;padding:var(--spacing-4xl);justify-content:center;">
                                <Spinner />
                                <span>"Загрузка..."</span>
                            </Flex>
                        }
                        .into_any();
                    }
                    if let Some(message) = error.get() {
                        return view! {
                            <div style="padding:var(--spacing-lg);color:var(--color-error);">
                                <strong>"Ошибка: "</strong>{message}
                            </div>
                        }
                        .into_any();
                    }
                    let rows = items.get();
                    if rows.is_empty() {
                        return view! {
                            <div style="padding:var(--spacing-lg);color:var(--color-text-secondary);">
                                "Ничего не найдено"
                            </div>
                        }
                        .into_any();
                    }

                    view! {
                        <div class="table-wrapper" style="padding: var(--spacing-lg);">
                            <Table attr:style="width:100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Название"</TableHeaderCell>
                                        <TableHeaderCell>"Категория"</TableHeaderCell>
                                        <TableHeaderCell>"Ед."</TableHeaderCell>
                                        <TableHeaderCell>"Доступно"</TableHeaderCell>
                                        <TableHeaderCell>"Брак"</TableHeaderCell>
                                        <TableHeaderCell></TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {rows
                                        .into_iter()
                                        .map(|product| {
                                            let product_id = product.id.clone();
                                            view! {
                                                <TableRow>
                                                    <TableCell>
                                                        <TableCellLayout truncate=true>
                                                            {product.name.clone()}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {product
                                                                .category
                                                                .clone()
                                                                .unwrap_or_else(|| "—".to_string())}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            {product.unit.clone()}
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <strong style="font-variant-numeric: tabular-nums;">
                                                                {format_qty(
                                                                    product.total_available,
                                                                    product.is_fractional,
                                                                )}
                                                            </strong>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <span style="font-variant-numeric: tabular-nums;">
                                                                {format_qty(
                                                                    product.total_defect,
                                                                    product.is_fractional,
                                                                )}
                                                            </span>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                    <TableCell>
                                                        <TableCellLayout>
                                                            <Button
                                                                appearance=ButtonAppearance::Secondary
                                                                size=ButtonSize::Small
                                                                on_click=move |_| {
                                                                    on_open.run(product_id.clone())
                                                                }
                                                            >
                                                                "Остатки"
                                                            </Button>
                                                        </TableCellLayout>
                                                    </TableCell>
                                                </TableRow>
                                            }
                                        })
                                        .collect_view()}
                                </TableBody>
                            </Table>
                        </div>
                    }
                    .into_any()
                }}

                <div style="display: flex; gap: var(--spacing-sm); align-items: center; padding: 0 var(--spacing-lg) var(--spacing-lg);">
                    <button
                        class="pagination-btn"
                        disabled=move || list_state.get().page <= 1
                        on:click=move |_| {
                            let page = list_state.get_untracked().page;
                            if page > 1 {
                                load(page - 1);
                            }
                        }
                    >
                        "Назад"
                    </button>
                    <span class="pagination-info">
                        {move || {
                            let s = list_state.get();
                            format!("{} / {} ({})", s.page, s.total_pages.max(1), s.total_count)
                        }}
                    </span>
                    <button
                        class="pagination-btn"
                        disabled=move || {
                            let s = list_state.get();
                            s.page >= s.total_pages
                        }
                        on:click=move |_| {
                            let s = list_state.get_untracked();
                            if s.page < s.total_pages {
                                load(s.page + 1);
                            }
                        }
                    >
                        "Вперёд"
                    </button>
                </div>
            </div>
        </div>
    }
}
