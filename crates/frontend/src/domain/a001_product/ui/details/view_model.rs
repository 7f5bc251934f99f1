//! ViewModel карточки остатков товара (EditDetails MVVM Standard)
//!
//! Держит проекцию товара и арену лент по точкам продаж; после любой
//! успешной мутации перечитывает проекцию целиком — локальная правка
//! производных количеств не выполняется никогда.

use std::collections::HashMap;

use contracts::domain::a001_product::aggregate::{LocationStock, Product};
use contracts::domain::a002_stock_batch::requests::BatchFilter;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::feed::BatchFeedState;
use crate::domain::a001_product::api;

/// ViewModel карточки остатков. Все поля — сигналы, поэтому тип Copy
/// и свободно уходит в обработчики событий.
#[derive(Clone, Copy)]
pub struct ProductStockVm {
    pub product_id: StoredValue<String>,

    // === Проекция ===
    pub product: RwSignal<Option<Product>>,
    pub locations: RwSignal<Vec<LocationStock>>,

    /// Арена лент: один слот состояния на каждую видимую точку
    pub feeds: RwSignal<HashMap<String, RwSignal<BatchFeedState>>>,

    /// Активный фильтр по точке (None — все точки)
    pub location_filter: RwSignal<Option<String>>,
    /// Полный перечень точек для селектора фильтра
    /// (не сужается, когда выбрана одна точка)
    pub location_options: RwSignal<Vec<(String, String)>>,

    // === UI State ===
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ProductStockVm {
    pub fn new(product_id: String) -> Self {
        Self {
            product_id: StoredValue::new(product_id),
            product: RwSignal::new(None),
            locations: RwSignal::new(Vec::new()),
            feeds: RwSignal::new(HashMap::new()),
            location_filter: RwSignal::new(None),
            location_options: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Загрузить товар и разрез по точкам.
    /// Ошибка выставляется на уровне страницы и останавливает зависимые блоки.
    pub fn load_product(&self) {
        let this = *self;
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            let product_id = this.product_id.get_value();
            let location_filter = this.location_filter.get_untracked();

            match api::fetch_product(&product_id).await {
                Ok(product) => {
                    this.product.set(Some(product));
                    match api::fetch_product_locations(&product_id, location_filter.as_deref())
                        .await
                    {
                        Ok(locations) => {
                            if location_filter.is_none() {
                                this.location_options.set(
                                    locations
                                        .iter()
                                        .map(|l| (l.id.clone(), l.name.clone()))
                                        .collect(),
                                );
                            }
                            this.sync_feeds(&locations);
                            this.locations.set(locations);
                        }
                        Err(e) => {
                            log::error!("разрез по точкам: {e}");
                            this.error.set(Some(e));
                        }
                    }
                }
                Err(e) => {
                    log::error!("товар {product_id}: {e}");
                    this.error.set(Some(e));
                }
            }
            this.loading.set(false);
        });
    }

    /// Единственный механизм согласованности после мутации: перечитать товар
    /// и первую страницу каждой видимой ленты с её текущим фильтром.
    pub fn refresh_after_mutation(&self) {
        self.load_product();
    }

    /// Смена фильтра по точке очищает и перезагружает затронутые ленты
    pub fn set_location_filter(&self, location_id: Option<String>) {
        self.location_filter.set(location_id);
        self.load_product();
    }

    pub fn feed(&self, location_id: &str) -> Option<RwSignal<BatchFeedState>> {
        self.feeds.get_untracked().get(location_id).copied()
    }

    /// Для каждой точки из ответа — свой слот ленты; затем каждая лента
    /// перезапускается с первой страницы со своим текущим фильтром.
    fn sync_feeds(&self, locations: &[LocationStock]) {
        self.feeds.update(|feeds| {
            for location in locations {
                feeds
                    .entry(location.id.clone())
                    .or_insert_with(|| RwSignal::new(BatchFeedState::new(&location.id)));
            }
        });
        for location in locations {
            self.reload_feed(&location.id, None);
        }
    }

    /// Перезагрузка ленты точки с первой страницы
    /// (None — оставить текущий фильтр)
    pub fn reload_feed(&self, location_id: &str, filter: Option<BatchFilter>) {
        let Some(feed) = self.feed(location_id) else {
            return;
        };
        let Some((ticket, query)) = feed.try_update(|f| f.start_reload(filter)) else {
            return;
        };
        let product_id = self.product_id.get_value();

        spawn_local(async move {
            let result = api::fetch_batches_and_defects(&product_id, &query).await;
            if let Err(e) = &result {
                log::error!("лента партий: {e}");
            }
            feed.update(|f| {
                f.complete(ticket, result);
            });
        });
    }

    /// «Показать ещё»: no-op, если страниц больше нет или загрузка уже идёт
    pub fn load_more(&self, location_id: &str) {
        let Some(feed) = self.feed(location_id) else {
            return;
        };
        let Some(Some((ticket, query))) = feed.try_update(|f| f.start_load_more()) else {
            return;
        };
        let product_id = self.product_id.get_value();

        spawn_local(async move {
            let result = api::fetch_batches_and_defects(&product_id, &query).await;
            if let Err(e) = &result {
                log::error!("лента партий: {e}");
            }
            feed.update(|f| {
                f.complete(ticket, result);
            });
        });
    }
}
