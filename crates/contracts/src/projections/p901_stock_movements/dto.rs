use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::pagination::Pagination;

/// Область журнала движений: одна строка остатка либо цена пары (вариант, точка)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementScope {
    Stock(String),
    Price(String),
}

impl MovementScope {
    pub fn id(&self) -> &str {
        match self {
            MovementScope::Stock(id) | MovementScope::Price(id) => id,
        }
    }
}

/// Тип события журнала
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Received,
    Sale,
    Return,
    Defect,
    Writeoff,
    InventoryAdjustment,
}

impl MovementKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MovementKind::Received => "Приход",
            MovementKind::Sale => "Продажа",
            MovementKind::Return => "Возврат",
            MovementKind::Defect => "Брак",
            MovementKind::Writeoff => "Списание",
            MovementKind::InventoryAdjustment => "Инвентаризация",
        }
    }
}

/// Событие журнала движений
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementEvent {
    pub id: String,
    pub kind: MovementKind,
    /// Со знаком: приход > 0, расход < 0
    pub quantity: f64,
    pub actor: Option<String>,
    /// Ссылка на чек или партию, если событие её несёт
    pub document_ref: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// События одного дня (сервер группирует по датам)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementDay {
    /// YYYY-MM-DD
    pub date: String,
    pub events: Vec<MovementEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovementHistoryQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for MovementHistoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovementHistoryResponse {
    #[serde(default)]
    pub days: Vec<MovementDay>,
    #[serde(default)]
    pub pagination: Pagination,
}
