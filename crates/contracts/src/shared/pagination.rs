use serde::{Deserialize, Serialize};

/// Блок пагинации в постраничных ответах API склада.
///
/// `has_next` приходит с сервера и является единственным признаком,
/// по которому клиент решает, запрашивать ли следующую страницу.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next: bool,
}

impl Pagination {
    /// Пагинация единственной (и последней) страницы — удобна в тестах
    pub fn last_page(page: u32, total_pages: u32, total_count: u64) -> Self {
        Self {
            current_page: page,
            total_pages,
            total_count,
            has_next: page < total_pages,
        }
    }
}
