use serde::{Deserialize, Serialize};

use super::aggregate::{Batch, Defect};
use crate::enums::writeoff_reason::WriteoffReason;
use crate::shared::pagination::Pagination;

/// Фильтр ленты партий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchFilter {
    All,
    HasStock,
    SoldOut,
}

impl BatchFilter {
    pub fn code(&self) -> &'static str {
        match self {
            BatchFilter::All => "all",
            BatchFilter::HasStock => "has_stock",
            BatchFilter::SoldOut => "sold_out",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BatchFilter::All => "Все",
            BatchFilter::HasStock => "В наличии",
            BatchFilter::SoldOut => "Распродано",
        }
    }

    pub fn all() -> Vec<BatchFilter> {
        vec![BatchFilter::All, BatchFilter::HasStock, BatchFilter::SoldOut]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "all" => Some(BatchFilter::All),
            "has_stock" => Some(BatchFilter::HasStock),
            "sold_out" => Some(BatchFilter::SoldOut),
            _ => None,
        }
    }
}

/// Сортировка ленты партий; по умолчанию — свежие поступления сверху
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchSort {
    #[serde(rename = "-received_date")]
    ReceivedDesc,
    #[serde(rename = "received_date")]
    ReceivedAsc,
}

impl Default for BatchSort {
    fn default() -> Self {
        BatchSort::ReceivedDesc
    }
}

/// Параметры комбинированного запроса партий и брака.
///
/// Поля `location_*` задают независимое окно ленты одной точки; верхнеуровневые
/// `sort/filter/page` относятся к общему (без разреза по точке) списку.
#[derive(Debug, Clone, Serialize)]
pub struct BatchesQuery {
    pub sort: BatchSort,
    pub filter: BatchFilter,
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_filter: Option<BatchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_sort: Option<BatchSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_page_size: Option<u32>,
    pub defect_sort: String,
    pub defect_page: u32,
    pub defect_page_size: u32,
}

impl Default for BatchesQuery {
    fn default() -> Self {
        Self {
            sort: BatchSort::default(),
            filter: BatchFilter::All,
            page: 1,
            page_size: 3,
            location_id: None,
            location_filter: None,
            location_sort: None,
            location_page: None,
            location_page_size: None,
            defect_sort: "-created_at".to_string(),
            defect_page: 1,
            defect_page_size: 20,
        }
    }
}

impl BatchesQuery {
    /// Окно ленты одной точки продаж
    pub fn for_location(
        location_id: &str,
        filter: BatchFilter,
        sort: BatchSort,
        page: u32,
        page_size: u32,
    ) -> Self {
        Self {
            location_id: Some(location_id.to_string()),
            location_filter: Some(filter),
            location_sort: Some(sort),
            location_page: Some(page),
            location_page_size: Some(page_size),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchesAndDefectsResponse {
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub batches_pagination: Pagination,
    #[serde(default)]
    pub defects: Vec<Defect>,
    #[serde(default)]
    pub defects_pagination: Pagination,
}

/// Создание партии: шапка документа плюс строки по парам (вариант, точка)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBatchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub stocks: Vec<NewStockPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStockPayload {
    pub variant_on_location_id: String,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_quantity: Option<f64>,
    pub is_available_for_sale: bool,
    pub is_active_on_marketplace: bool,
    pub is_active_for_offline_sale: bool,
    pub is_active_on_own_site: bool,
}

/// Тело создания/правки записи брака
#[derive(Debug, Clone, Serialize)]
pub struct DefectPayload {
    pub quantity: f64,
    pub reason: String,
}

/// Тело создания/правки списания
#[derive(Debug, Clone, Serialize)]
pub struct WriteoffPayload {
    pub quantity: f64,
    pub reason: WriteoffReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_query_sets_location_window() {
        let query = BatchesQuery::for_location("loc-5", BatchFilter::HasStock, BatchSort::ReceivedDesc, 2, 3);
        assert_eq!(query.location_id.as_deref(), Some("loc-5"));
        assert_eq!(query.location_filter, Some(BatchFilter::HasStock));
        assert_eq!(query.location_page, Some(2));
        // верхнеуровневое окно остаётся дефолтным
        assert_eq!(query.page, 1);
        assert_eq!(query.filter, BatchFilter::All);
    }

    #[test]
    fn test_filter_codes_match_api() {
        for filter in BatchFilter::all() {
            let encoded = serde_json::to_string(&filter).unwrap();
            assert_eq!(encoded, format!("\"{}\"", filter.code()));
        }
    }
}
