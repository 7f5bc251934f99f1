use serde::{Deserialize, Serialize};

use super::aggregate::Product;
use crate::shared::pagination::Pagination;

/// Параметры списка товаров
#[derive(Debug, Clone, Serialize)]
pub struct ProductsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ProductsQuery {
    fn default() -> Self {
        Self {
            q: None,
            page: 1,
            page_size: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductListResponse {
    pub items: Vec<Product>,
    pub pagination: Pagination,
}

/// Идемпотентный upsert цены и флагов активности пары (вариант, точка).
///
/// Один и тот же вызов используется и для первого назначения цены,
/// и для правки, и для переключения отдельных флагов.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertPricePayload {
    pub variant_id: String,
    pub location_id: String,
    pub selling_price: f64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active_on_marketplace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active_for_offline_sale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active_on_own_site: Option<bool>,
}
