use serde::{Deserialize, Serialize};

// ============================================================================
// Проекции товара (read model API склада)
// ============================================================================

/// Товар каталога с агрегированными остатками.
///
/// Источник истины — удалённый API склада: все количества здесь только
/// отображаются и никогда не пересчитываются на клиенте.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Единица измерения ("шт", "кг", "м")
    pub unit: String,
    /// Дробная единица: количество вводится с шагом 0.001
    #[serde(default)]
    pub is_fractional: bool,
    #[serde(default)]
    pub total_available: f64,
    #[serde(default)]
    pub total_defect: f64,
    /// Разрез по точкам продаж; может прийти пустым и догружаться отдельно
    #[serde(default)]
    pub locations: Vec<LocationStock>,
}

impl Product {
    /// Минимальный шаг количества для этого товара
    pub fn quantity_step(&self) -> f64 {
        if self.is_fractional {
            0.001
        } else {
            1.0
        }
    }
}

/// Точка продаж (склад/магазин) с вариантами товара на ней
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationStock {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variants: Vec<VariantOnLocation>,
}

impl LocationStock {
    /// Найти вариант по id пары (вариант, точка)
    pub fn variant(&self, variant_on_location_id: &str) -> Option<&VariantOnLocation> {
        self.variants.iter().find(|v| v.id == variant_on_location_id)
    }

    /// Варианты, для которых уже задана цена: только их можно оприходовать
    pub fn priced_variants(&self) -> impl Iterator<Item = &VariantOnLocation> {
        self.variants.iter().filter(|v| v.has_price())
    }
}

/// Вариант товара на конкретной точке продаж
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantOnLocation {
    /// ID пары (вариант, точка) — именно его ждёт createBatch
    pub id: String,
    pub variant_id: String,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<f64>,
    /// Отсутствует, пока цена ни разу не задавалась
    pub price_id: Option<String>,
    #[serde(default)]
    pub is_price_active: bool,
    #[serde(default)]
    pub is_active_on_marketplace: bool,
    #[serde(default)]
    pub is_active_for_offline_sale: bool,
    #[serde(default)]
    pub is_active_on_own_site: bool,
    /// Доступный остаток — авторитетное значение сервера
    #[serde(default)]
    pub available_quantity: f64,
    #[serde(default)]
    pub reserved_quantity: f64,
    #[serde(default)]
    pub defect_quantity: f64,
}

impl VariantOnLocation {
    /// Цена существует (возможно, неактивна)
    pub fn has_price(&self) -> bool {
        self.price_id.is_some()
    }

    /// Переключатели каналов продаж имеют смысл только при ненулевом остатке
    pub fn can_toggle_channels(&self) -> bool {
        self.available_quantity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(price_id: Option<&str>, available: f64) -> VariantOnLocation {
        VariantOnLocation {
            id: "vl-1".into(),
            variant_id: "v-1".into(),
            name: "Размер M".into(),
            sku: None,
            price: price_id.map(|_| 1500.0),
            price_id: price_id.map(String::from),
            is_price_active: false,
            is_active_on_marketplace: false,
            is_active_for_offline_sale: false,
            is_active_on_own_site: false,
            available_quantity: available,
            reserved_quantity: 0.0,
            defect_quantity: 0.0,
        }
    }

    #[test]
    fn test_channel_toggles_require_stock() {
        assert!(!variant(Some("p-1"), 0.0).can_toggle_channels());
        assert!(variant(Some("p-1"), 1.0).can_toggle_channels());
    }

    #[test]
    fn test_priced_variants_filter() {
        let loc = LocationStock {
            id: "l-1".into(),
            name: "Основной склад".into(),
            variants: vec![variant(Some("p-1"), 3.0), variant(None, 3.0)],
        };
        assert_eq!(loc.priced_variants().count(), 1);
    }
}
