//! Журнал движений: события одной строки остатка или одной цены,
//! сгруппированные по датам, с инкрементальной подгрузкой и выгрузкой в xlsx.

use contracts::projections::p901_stock_movements::dto::{
    MovementDay, MovementHistoryQuery, MovementScope,
};
use contracts::shared::pagination::Pagination;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::domain::a001_product::api;
use crate::shared::export::{save_binary_file, XLSX_MIME};
use crate::shared::format::{format_date, format_signed_qty};
use crate::shared::icons::icon;

/// Постраничный курсор журнала.
///
/// Останавливается сам, как только сервер сообщил об отсутствии следующей
/// страницы; повторный вызов во время загрузки — no-op.
#[derive(Debug, Clone)]
pub struct HistoryPager {
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub loading: bool,
}

impl HistoryPager {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            page_size,
            has_next: true,
            loading: false,
        }
    }

    /// Запрос следующей страницы; None — грузимся или страниц больше нет
    pub fn next_request(&mut self) -> Option<MovementHistoryQuery> {
        if self.loading || !self.has_next {
            return None;
        }
        self.loading = true;
        Some(MovementHistoryQuery {
            page: self.page + 1,
            page_size: self.page_size,
        })
    }

    /// Завершение загрузки; None — ошибка, позиция курсора не сдвигается
    pub fn complete(&mut self, pagination: Option<&Pagination>) {
        self.loading = false;
        if let Some(p) = pagination {
            self.page = p.current_page;
            self.has_next = p.has_next;
        }
    }
}

/// Модал журнала движений
#[component]
pub fn MovementHistoryModal(
    scope: MovementScope,
    title: String,
    is_fractional: bool,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let scope = StoredValue::new(scope);
    let days = RwSignal::new(Vec::<MovementDay>::new());
    let pager = RwSignal::new(HistoryPager::new(30));
    let (error, set_error) = signal(None::<String>);
    let (exporting, set_exporting) = signal(false);

    let load_more = move || {
        let Some(Some(query)) = pager.try_update(|p| p.next_request()) else {
            return;
        };
        spawn_local(async move {
            match api::fetch_movement_history(&scope.get_value(), &query).await {
                Ok(response) => {
                    days.update(|d| d.extend(response.days));
                    pager.update(|p| p.complete(Some(&response.pagination)));
                    set_error.set(None);
                }
                Err(message) => {
                    // чтение деградирует до последнего успешного состояния
                    log::error!("журнал движений: {message}");
                    pager.update(|p| p.complete(None));
                    set_error.set(Some(message));
                }
            }
        });
    };

    Effect::new(move |_| {
        load_more();
    });

    let export = move |_| {
        if exporting.get_untracked() {
            return;
        }
        set_exporting.set(true);
        spawn_local(async move {
            let result = api::export_movement_history(&scope.get_value()).await;
            set_exporting.set(false);
            let failure = match result {
                Ok(bytes) => {
                    save_binary_file(&bytes, "dvizheniya.xlsx", XLSX_MIME).err()
                }
                Err(message) => Some(message),
            };
            if let Some(message) = failure {
                // выгрузка — единственный поток с блокирующим alert
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&format!("Выгрузка не удалась: {message}"));
                }
            }
        });
    };

    // подгрузка при прокрутке к низу списка
    let handle_scroll = move |ev: web_sys::Event| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let near_bottom =
            target.scroll_top() + target.client_height() >= target.scroll_height() - 120;
        if near_bottom {
            load_more();
        }
    };

    view! {
        <div class="history" style="min-width: 560px; max-width: 720px; padding: var(--spacing-lg); display: flex; flex-direction: column; gap: var(--spacing-md);">
            <div class="page__header">
                <h2 class="page__title">{format!("Движения — {}", title)}</h2>
                <div style="display: flex; gap: var(--spacing-sm);">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=exporting
                        on_click=export
                    >
                        {icon("download")}
                        {move || if exporting.get() { "Выгрузка..." } else { "В xlsx" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        "✕"
                    </Button>
                </div>
            </div>

            {move || {
                error
                    .get()
                    .map(|message| {
                        view! {
                            <div style="padding: var(--spacing-sm); color: var(--color-error); font-size: var(--font-size-sm);">
                                {format!("Не удалось загрузить страницу: {} — показаны ранее загруженные данные", message)}
                            </div>
                        }
                    })
            }}

            <div
                style="max-height: 60vh; overflow-y: auto; display: flex; flex-direction: column; gap: var(--spacing-md);"
                on:scroll=handle_scroll
            >
                {move || {
                    let loaded = days.get();
                    if loaded.is_empty() && !pager.get().loading {
                        return view! {
                            <div style="color: var(--color-text-secondary); padding: var(--spacing-lg); text-align: center;">
                                "Движений пока нет"
                            </div>
                        }
                        .into_any();
                    }
                    loaded
                        .into_iter()
                        .map(|day| {
                            view! {
                                <div class="history__day">
                                    <h3 style="margin: 0 0 var(--spacing-xs) 0; font-size: var(--font-size-md);">
                                        {format_date(&day.date)}
                                    </h3>
                                    <table style="width: 100%;">
                                        <tbody>
                                            {day
                                                .events
                                                .into_iter()
                                                .map(|event| {
                                                    let time =
                                                        event.occurred_at.format("%H:%M").to_string();
                                                    view! {
                                                        <tr>
                                                            <td style="width: 50px; color: var(--color-text-secondary);">
                                                                {time}
                                                            </td>
                                                            <td>{event.kind.display_name()}</td>
                                                            <td style="font-variant-numeric: tabular-nums; text-align: right;">
                                                                {format_signed_qty(
                                                                    event.quantity,
                                                                    is_fractional,
                                                                )}
                                                            </td>
                                                            <td style="color: var(--color-text-secondary);">
                                                                {event.actor.unwrap_or_default()}
                                                            </td>
                                                            <td style="color: var(--color-text-secondary);">
                                                                {event.document_ref.unwrap_or_default()}
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}

                {move || {
                    let state = pager.get();
                    if state.loading {
                        view! {
                            <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-sm);">
                                <Spinner />
                                <span>"Загрузка..."</span>
                            </Flex>
                        }
                        .into_any()
                    } else if state.has_next {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| load_more()
                            >
                                "Показать ещё"
                            </Button>
                        }
                        .into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pager_walks_pages() {
        let mut pager = HistoryPager::new(30);
        let query = pager.next_request().expect("first page");
        assert_eq!(query.page, 1);
        pager.complete(Some(&Pagination::last_page(1, 3, 90)));
        assert_eq!(pager.page, 1);

        let query = pager.next_request().expect("second page");
        assert_eq!(query.page, 2);
    }

    #[test]
    fn test_pager_stops_on_last_page() {
        let mut pager = HistoryPager::new(30);
        pager.next_request().unwrap();
        pager.complete(Some(&Pagination::last_page(1, 1, 10)));
        // сервер сообщил, что страниц больше нет — запрос не формируется
        assert!(pager.next_request().is_none());
    }

    #[test]
    fn test_pager_single_flight() {
        let mut pager = HistoryPager::new(30);
        assert!(pager.next_request().is_some());
        assert!(pager.next_request().is_none());
    }

    #[test]
    fn test_pager_error_keeps_position() {
        let mut pager = HistoryPager::new(30);
        pager.next_request().unwrap();
        pager.complete(Some(&Pagination::last_page(1, 2, 60)));

        pager.next_request().unwrap();
        pager.complete(None); // ошибка: позиция не сдвигается
        assert_eq!(pager.page, 1);

        // повтор запрашивает ту же страницу
        assert_eq!(pager.next_request().unwrap().page, 2);
    }
}
