use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::writeoff_reason::WriteoffReason;

// ============================================================================
// Партия и строки остатков (read model журнала поступлений)
// ============================================================================

/// Партия — одно физическое поступление, объединяющее строки остатков
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    /// Номер может назначить сервер, если оператор оставил поле пустым
    pub batch_number: Option<String>,
    /// Дата поступления (YYYY-MM-DD)
    pub received_date: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stocks: Vec<StockLine>,
}

impl Batch {
    /// Подпись партии для заголовка карточки
    pub fn caption(&self) -> String {
        match (&self.batch_number, &self.received_date) {
            (Some(n), Some(d)) => format!("Партия {} от {}", n, d),
            (Some(n), None) => format!("Партия {}", n),
            (None, Some(d)) => format!("Партия от {}", d),
            (None, None) => "Партия".to_string(),
        }
    }

    pub fn total_quantity(&self) -> f64 {
        self.stocks.iter().map(|s| s.quantity).sum()
    }

    pub fn total_available(&self) -> f64 {
        self.stocks.iter().map(|s| s.available_quantity).sum()
    }
}

/// Строка остатка: атомарная запись журнала в разрезе (вариант, точка, партия).
///
/// `available_quantity` вычисляется сервером; клиент использует его только
/// для отображения и как верхнюю границу новых вычетов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLine {
    pub id: String,
    pub variant_on_location_id: String,
    pub variant_name: String,
    pub sku: Option<String>,
    pub location_id: String,
    pub quantity: f64,
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub reserved_quantity: f64,
    #[serde(default)]
    pub available_quantity: f64,
    #[serde(default)]
    pub sold_quantity: f64,
    #[serde(default)]
    pub returned_quantity: f64,
    #[serde(default)]
    pub defect_quantity: f64,
    #[serde(default)]
    pub writeoff_quantity: f64,
    /// Со знаком: излишек при инвентаризации > 0, недостача < 0
    #[serde(default)]
    pub inventory_adjustment: f64,
    #[serde(default)]
    pub is_available_for_sale: bool,
    #[serde(default)]
    pub is_active_on_marketplace: bool,
    #[serde(default)]
    pub is_active_for_offline_sale: bool,
    #[serde(default)]
    pub is_active_on_own_site: bool,
    #[serde(default)]
    pub defects: Vec<Defect>,
    #[serde(default)]
    pub writeoffs: Vec<Writeoff>,
}

/// Зафиксированный брак по строке остатка
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defect {
    pub id: String,
    pub stock_id: String,
    pub quantity: f64,
    pub reason: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Ссылка на перемещение, породившее списание
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRef {
    pub id: String,
    pub number: Option<String>,
}

/// Списание по строке остатка
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Writeoff {
    pub id: String,
    pub stock_id: String,
    pub quantity: f64,
    pub reason: WriteoffReason,
    pub reason_detail: Option<String>,
    /// Присутствует у списаний, созданных перемещением
    pub transfer: Option<TransferRef>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Writeoff {
    /// Списание, созданное перемещением, редактирует и удаляет только
    /// подсистема перемещений — консоль не показывает для него действий.
    pub fn is_transfer_locked(&self) -> bool {
        self.transfer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_caption() {
        let mut batch = Batch {
            id: "b-1".into(),
            batch_number: Some("П-0042".into()),
            received_date: Some("2026-07-01".into()),
            supplier: None,
            notes: None,
            created_at: None,
            stocks: vec![],
        };
        assert_eq!(batch.caption(), "Партия П-0042 от 2026-07-01");
        batch.batch_number = None;
        assert_eq!(batch.caption(), "Партия от 2026-07-01");
    }

    #[test]
    fn test_transfer_writeoff_is_locked() {
        let writeoff = Writeoff {
            id: "w-1".into(),
            stock_id: "s-1".into(),
            quantity: 2.0,
            reason: WriteoffReason::Other,
            reason_detail: None,
            transfer: Some(TransferRef {
                id: "t-9".into(),
                number: Some("ПМ-7".into()),
            }),
            created_at: None,
        };
        assert!(writeoff.is_transfer_locked());
    }
}
