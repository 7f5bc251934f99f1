use serde::{Deserialize, Serialize};

/// Причины списания товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteoffReason {
    Expired,
    Damaged,
    Lost,
    Other,
}

impl WriteoffReason {
    /// Получить код причины (как в API)
    pub fn code(&self) -> &'static str {
        match self {
            WriteoffReason::Expired => "expired",
            WriteoffReason::Damaged => "damaged",
            WriteoffReason::Lost => "lost",
            WriteoffReason::Other => "other",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            WriteoffReason::Expired => "Истёк срок годности",
            WriteoffReason::Damaged => "Повреждение",
            WriteoffReason::Lost => "Утеря",
            WriteoffReason::Other => "Другое",
        }
    }

    /// Все причины в порядке отображения в форме
    pub fn all() -> Vec<WriteoffReason> {
        vec![
            WriteoffReason::Expired,
            WriteoffReason::Damaged,
            WriteoffReason::Lost,
            WriteoffReason::Other,
        ]
    }

    /// Парсинг из кода
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "expired" => Some(WriteoffReason::Expired),
            "damaged" => Some(WriteoffReason::Damaged),
            "lost" => Some(WriteoffReason::Lost),
            "other" => Some(WriteoffReason::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_codes_match_api() {
        for reason in WriteoffReason::all() {
            let encoded = serde_json::to_string(&reason).unwrap();
            assert_eq!(encoded, format!("\"{}\"", reason.code()));
            let decoded: WriteoffReason = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, reason);
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(WriteoffReason::from_code("lost"), Some(WriteoffReason::Lost));
        assert_eq!(WriteoffReason::from_code("unknown"), None);
    }
}
