use std::fmt;

use crate::domain::a002_stock_batch::aggregate::{Defect, StockLine, Writeoff};
use crate::domain::a002_stock_batch::requests::{DefectPayload, WriteoffPayload};
use crate::enums::writeoff_reason::WriteoffReason;

// ============================================================================
// Единая модель вычета: брак и списание
// ============================================================================

/// Вид вычета с одной строки остатка
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Defect,
    Writeoff,
}

impl AdjustmentKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AdjustmentKind::Defect => "Брак",
            AdjustmentKind::Writeoff => "Списание",
        }
    }
}

/// Данные, различающиеся между браком и списанием.
/// Правило ограничения количества и жизненный цикл сохранения — общие.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentDetails {
    Defect { reason: String },
    Writeoff { reason: WriteoffReason, reason_detail: String },
}

/// Ошибка локальной проверки; при ней запрос к серверу не отправляется
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentError {
    Empty,
    BelowMinimum { min_step: f64 },
    ExceedsCap { cap: f64 },
}

impl fmt::Display for AdjustmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentError::Empty => write!(f, "Укажите количество"),
            AdjustmentError::BelowMinimum { min_step } => {
                write!(f, "Количество должно быть не меньше {}", min_step)
            }
            AdjustmentError::ExceedsCap { cap } => {
                write!(f, "Недостаточно доступного остатка: максимум {}", cap)
            }
        }
    }
}

/// Черновик брака/списания с контролем верхней границы количества.
///
/// При создании граница равна доступному остатку строки; при правке —
/// доступному остатку плюс текущему количеству записи (правка сначала
/// «возвращает» старый вычет, затем применяет новый).
#[derive(Debug, Clone)]
pub struct StockAdjustment {
    pub stock_id: String,
    /// ID существующей записи при правке; None при создании
    pub existing_id: Option<String>,
    /// None допустим временно — поле очищено оператором
    pub quantity: Option<f64>,
    pub available_cap: f64,
    pub min_step: f64,
    pub details: AdjustmentDetails,
}

impl StockAdjustment {
    pub fn for_create(stock: &StockLine, kind: AdjustmentKind, min_step: f64) -> Self {
        let details = match kind {
            AdjustmentKind::Defect => AdjustmentDetails::Defect {
                reason: String::new(),
            },
            AdjustmentKind::Writeoff => AdjustmentDetails::Writeoff {
                reason: WriteoffReason::Expired,
                reason_detail: String::new(),
            },
        };
        Self {
            stock_id: stock.id.clone(),
            existing_id: None,
            quantity: None,
            available_cap: stock.available_quantity,
            min_step,
            details,
        }
    }

    pub fn for_edit_defect(stock: &StockLine, defect: &Defect, min_step: f64) -> Self {
        Self {
            stock_id: stock.id.clone(),
            existing_id: Some(defect.id.clone()),
            quantity: Some(defect.quantity),
            available_cap: stock.available_quantity + defect.quantity,
            min_step,
            details: AdjustmentDetails::Defect {
                reason: defect.reason.clone(),
            },
        }
    }

    /// Списания с ссылкой на перемещение сюда не попадают:
    /// UI не показывает для них действий (см. `Writeoff::is_transfer_locked`).
    pub fn for_edit_writeoff(stock: &StockLine, writeoff: &Writeoff, min_step: f64) -> Self {
        Self {
            stock_id: stock.id.clone(),
            existing_id: Some(writeoff.id.clone()),
            quantity: Some(writeoff.quantity),
            available_cap: stock.available_quantity + writeoff.quantity,
            min_step,
            details: AdjustmentDetails::Writeoff {
                reason: writeoff.reason,
                reason_detail: writeoff.reason_detail.clone().unwrap_or_default(),
            },
        }
    }

    pub fn kind(&self) -> AdjustmentKind {
        match self.details {
            AdjustmentDetails::Defect { .. } => AdjustmentKind::Defect,
            AdjustmentDetails::Writeoff { .. } => AdjustmentKind::Writeoff,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }

    /// Тихое ограничение вводимого значения в [min_step, available_cap].
    /// Не заменяет `validate`: граница может быть ниже минимального шага.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min_step).min(self.available_cap)
    }

    /// Обновить количество по вводу; очистка поля допустима временно
    pub fn set_quantity(&mut self, value: Option<f64>) {
        self.quantity = value.map(|v| self.clamp(v));
    }

    /// Локальная проверка перед сохранением
    pub fn validate(&self) -> Result<f64, AdjustmentError> {
        let quantity = self.quantity.ok_or(AdjustmentError::Empty)?;
        if quantity < self.min_step {
            return Err(AdjustmentError::BelowMinimum {
                min_step: self.min_step,
            });
        }
        if quantity > self.available_cap {
            return Err(AdjustmentError::ExceedsCap {
                cap: self.available_cap,
            });
        }
        Ok(quantity)
    }

    /// Тело запроса по виду вычета; Err — проверка не пройдена,
    /// запрос формировать нельзя
    pub fn payload(&self) -> Result<AdjustmentPayload, AdjustmentError> {
        let quantity = self.validate()?;
        Ok(match &self.details {
            AdjustmentDetails::Defect { reason } => AdjustmentPayload::Defect(DefectPayload {
                quantity,
                reason: reason.clone(),
            }),
            AdjustmentDetails::Writeoff {
                reason,
                reason_detail,
            } => AdjustmentPayload::Writeoff(WriteoffPayload {
                quantity,
                reason: *reason,
                reason_detail: if reason_detail.trim().is_empty() {
                    None
                } else {
                    Some(reason_detail.clone())
                },
            }),
        })
    }
}

/// Готовое тело запроса, различённое по виду вычета
#[derive(Debug, Clone)]
pub enum AdjustmentPayload {
    Defect(DefectPayload),
    Writeoff(WriteoffPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_line(available: f64) -> StockLine {
        StockLine {
            id: "s-1".into(),
            variant_on_location_id: "vl-1".into(),
            variant_name: "Размер M".into(),
            sku: None,
            location_id: "loc-1".into(),
            quantity: 10.0,
            cost_price: None,
            reserved_quantity: 0.0,
            available_quantity: available,
            sold_quantity: 0.0,
            returned_quantity: 0.0,
            defect_quantity: 0.0,
            writeoff_quantity: 0.0,
            inventory_adjustment: 0.0,
            is_available_for_sale: true,
            is_active_on_marketplace: false,
            is_active_for_offline_sale: false,
            is_active_on_own_site: false,
            defects: vec![],
            writeoffs: vec![],
        }
    }

    fn defect(quantity: f64) -> Defect {
        Defect {
            id: "d-1".into(),
            stock_id: "s-1".into(),
            quantity,
            reason: "бой при разгрузке".into(),
            created_at: None,
        }
    }

    // Сценарий: остаток 5, новая запись — граница 5, ввод 6 отклоняется без запроса
    #[test]
    fn test_create_cap_equals_available() {
        let mut draft = StockAdjustment::for_create(&stock_line(5.0), AdjustmentKind::Defect, 1.0);
        assert_eq!(draft.available_cap, 5.0);

        draft.quantity = Some(6.0);
        assert_eq!(draft.validate(), Err(AdjustmentError::ExceedsCap { cap: 5.0 }));
        assert!(draft.defect_payload().is_none());

        draft.quantity = Some(5.0);
        assert_eq!(draft.validate(), Ok(5.0));
    }

    // Сценарий: правка списания 3 при остатке 2 — граница 5, ввод 5 принимается
    #[test]
    fn test_edit_cap_releases_current_quantity() {
        let writeoff = Writeoff {
            id: "w-1".into(),
            stock_id: "s-1".into(),
            quantity: 3.0,
            reason: WriteoffReason::Damaged,
            reason_detail: None,
            transfer: None,
            created_at: None,
        };
        let mut draft = StockAdjustment::for_edit_writeoff(&stock_line(2.0), &writeoff, 1.0);
        assert_eq!(draft.available_cap, 5.0);

        draft.quantity = Some(5.0);
        assert_eq!(draft.validate(), Ok(5.0));

        draft.quantity = Some(6.0);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_edit_defect_keeps_reason_and_quantity() {
        let draft = StockAdjustment::for_edit_defect(&stock_line(4.0), &defect(2.0), 1.0);
        assert_eq!(draft.available_cap, 6.0);
        assert_eq!(draft.quantity, Some(2.0));
        assert!(matches!(
            &draft.details,
            AdjustmentDetails::Defect { reason } if reason == "бой при разгрузке"
        ));
    }

    #[test]
    fn test_set_quantity_clamps_while_typing() {
        let mut draft = StockAdjustment::for_create(&stock_line(5.0), AdjustmentKind::Defect, 1.0);
        draft.set_quantity(Some(9.0));
        assert_eq!(draft.quantity, Some(5.0));
        draft.set_quantity(Some(0.2));
        assert_eq!(draft.quantity, Some(1.0));
        // очистка поля допустима до сохранения
        draft.set_quantity(None);
        assert_eq!(draft.validate(), Err(AdjustmentError::Empty));
    }

    #[test]
    fn test_fractional_min_step() {
        let mut draft =
            StockAdjustment::for_create(&stock_line(1.5), AdjustmentKind::Writeoff, 0.001);
        draft.quantity = Some(0.25);
        assert_eq!(draft.validate(), Ok(0.25));
        draft.quantity = Some(0.0);
        assert!(matches!(
            draft.validate(),
            Err(AdjustmentError::BelowMinimum { .. })
        ));
    }

    // Нулевой остаток: clamp не может поднять значение выше границы
    #[test]
    fn test_zero_available_rejects_any_quantity() {
        let mut draft = StockAdjustment::for_create(&stock_line(0.0), AdjustmentKind::Defect, 1.0);
        draft.set_quantity(Some(1.0));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_writeoff_payload_drops_blank_detail() {
        let mut draft =
            StockAdjustment::for_create(&stock_line(5.0), AdjustmentKind::Writeoff, 1.0);
        draft.quantity = Some(2.0);
        match draft.payload().unwrap() {
            AdjustmentPayload::Writeoff(payload) => {
                assert_eq!(payload.reason, WriteoffReason::Expired);
                assert!(payload.reason_detail.is_none());
            }
            AdjustmentPayload::Defect(_) => panic!("expected writeoff payload"),
        }
    }

    #[test]
    fn test_payload_refuses_invalid_draft() {
        let draft = StockAdjustment::for_create(&stock_line(5.0), AdjustmentKind::Defect, 1.0);
        assert!(matches!(draft.payload(), Err(AdjustmentError::Empty)));
    }
}
