//! Лента партий одной точки продаж: независимое окно пагинации и фильтра.
//!
//! Логика отделена от сигналов и сети, поэтому проверяется обычными
//! unit-тестами: решения «что запросить» возвращаются наружу, а результат
//! применяется через `complete`.

use contracts::domain::a002_stock_batch::aggregate::Batch;
use contracts::domain::a002_stock_batch::requests::{
    BatchFilter, BatchSort, BatchesAndDefectsResponse, BatchesQuery,
};
use contracts::shared::pagination::Pagination;

/// Размер страницы ленты: карточки партий крупные, листаем помалу
pub const FEED_PAGE_SIZE: u32 = 3;

/// Билет незавершённой загрузки.
///
/// Эпоха защищает слот ленты от записи устаревшего ответа: смена фильтра или
/// внешний refresh поднимают эпоху, и ответ прежней загрузки отбрасывается.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    page: u32,
    append: bool,
}

/// Состояние ленты партий одной точки; между точками состояние независимо
#[derive(Debug, Clone)]
pub struct BatchFeedState {
    pub location_id: String,
    pub filter: BatchFilter,
    pub sort: BatchSort,
    /// Последняя применённая страница (1-based)
    pub page: u32,
    pub page_size: u32,
    /// Накопленные карточки: замена при перезагрузке, конкатенация при «ещё»
    pub batches: Vec<Batch>,
    pub pagination: Option<Pagination>,
    pub error: Option<String>,
    epoch: u64,
    in_flight: Option<LoadTicket>,
}

impl BatchFeedState {
    pub fn new(location_id: &str) -> Self {
        Self {
            location_id: location_id.to_string(),
            filter: BatchFilter::All,
            sort: BatchSort::default(),
            page: 1,
            page_size: FEED_PAGE_SIZE,
            batches: Vec::new(),
            pagination: None,
            error: None,
            epoch: 0,
            in_flight: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.pagination.as_ref().map(|p| p.has_next).unwrap_or(false)
    }

    fn query(&self, page: u32) -> BatchesQuery {
        BatchesQuery::for_location(&self.location_id, self.filter, self.sort, page, self.page_size)
    }

    /// Перезагрузка с первой страницы: смена фильтра, смена сортировки,
    /// внешний refresh после мутации. Поднимает эпоху — незавершённая
    /// загрузка прежнего окна больше не сможет записаться в слот.
    pub fn start_reload(&mut self, filter: Option<BatchFilter>) -> (LoadTicket, BatchesQuery) {
        if let Some(filter) = filter {
            self.filter = filter;
        }
        self.epoch += 1;
        let ticket = LoadTicket {
            epoch: self.epoch,
            page: 1,
            append: false,
        };
        self.in_flight = Some(ticket);
        self.error = None;
        (ticket, self.query(1))
    }

    /// Следующая страница; None — если загрузка уже идёт или страниц больше нет
    pub fn start_load_more(&mut self) -> Option<(LoadTicket, BatchesQuery)> {
        if self.in_flight.is_some() || !self.has_next() {
            return None;
        }
        self.epoch += 1;
        let ticket = LoadTicket {
            epoch: self.epoch,
            page: self.page + 1,
            append: true,
        };
        self.in_flight = Some(ticket);
        self.error = None;
        Some((ticket, self.query(ticket.page)))
    }

    /// Применить результат загрузки. Возвращает false для устаревшего билета —
    /// такой ответ полностью игнорируется.
    ///
    /// Ошибка оставляет ленту в последнем успешном состоянии: накопленные
    /// страницы не очищаются и не смешиваются с частичными данными.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<BatchesAndDefectsResponse, String>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(response) => {
                if ticket.append {
                    self.batches.extend(response.batches);
                } else {
                    self.batches = response.batches;
                }
                self.page = ticket.page;
                self.pagination = Some(response.batches_pagination);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: &str) -> Batch {
        Batch {
            id: id.into(),
            batch_number: Some(id.to_uppercase()),
            received_date: Some("2026-07-01".into()),
            supplier: None,
            notes: None,
            created_at: None,
            stocks: vec![],
        }
    }

    fn page_response(ids: &[&str], page: u32, total_pages: u32) -> BatchesAndDefectsResponse {
        BatchesAndDefectsResponse {
            batches: ids.iter().map(|id| batch(id)).collect(),
            batches_pagination: Pagination::last_page(page, total_pages, (total_pages * 3) as u64),
            defects: vec![],
            defects_pagination: Pagination::default(),
        }
    }

    fn ids(feed: &BatchFeedState) -> Vec<&str> {
        feed.batches.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_load_more_appends() {
        let mut feed = BatchFeedState::new("loc-1");
        let (ticket, query) = feed.start_reload(None);
        assert_eq!(query.location_page, Some(1));
        assert!(feed.complete(ticket, Ok(page_response(&["b1", "b2", "b3"], 1, 2))));

        let (ticket, query) = feed.start_load_more().expect("has_next");
        assert_eq!(query.location_page, Some(2));
        assert!(feed.complete(ticket, Ok(page_response(&["b4"], 2, 2))));
        assert_eq!(ids(&feed), vec!["b1", "b2", "b3", "b4"]);
        assert_eq!(feed.page, 2);
    }

    #[test]
    fn test_load_more_is_noop_without_next_page() {
        let mut feed = BatchFeedState::new("loc-1");
        let (ticket, _) = feed.start_reload(None);
        feed.complete(ticket, Ok(page_response(&["b1"], 1, 1)));
        // has_next == false — запрос не формируется
        assert!(feed.start_load_more().is_none());
    }

    #[test]
    fn test_load_more_is_noop_while_in_flight() {
        let mut feed = BatchFeedState::new("loc-1");
        let (ticket, _) = feed.start_reload(None);
        feed.complete(ticket, Ok(page_response(&["b1"], 1, 3)));

        let first = feed.start_load_more();
        assert!(first.is_some());
        // одиночный полёт: повторный вызов до завершения — no-op
        assert!(feed.start_load_more().is_none());
    }

    // Переключение фильтра перезапускает ленту с первой страницы; страницы
    // прежнего фильтра не могут ни остаться, ни дозаписаться после ответа.
    #[test]
    fn test_filter_switch_discards_stale_pages() {
        let mut feed = BatchFeedState::new("loc-1");
        let (ticket, _) = feed.start_reload(None);
        feed.complete(ticket, Ok(page_response(&["all-1", "all-2", "all-3"], 1, 2)));

        // запущена вторая страница фильтра «все»…
        let (stale_ticket, _) = feed.start_load_more().unwrap();

        // …но оператор переключил фильтр до её прихода
        let (fresh_ticket, query) = feed.start_reload(Some(BatchFilter::HasStock));
        assert_eq!(query.location_filter, Some(BatchFilter::HasStock));
        assert_eq!(query.location_page, Some(1));

        // устаревший ответ отбрасывается целиком
        assert!(!feed.complete(stale_ticket, Ok(page_response(&["all-4"], 2, 2))));
        assert!(feed.is_loading());

        assert!(feed.complete(fresh_ticket, Ok(page_response(&["hs-1"], 1, 1))));
        assert_eq!(ids(&feed), vec!["hs-1"]);
        assert_eq!(feed.filter, BatchFilter::HasStock);
    }

    // Ошибка сети оставляет ленту в последнем успешном состоянии
    #[test]
    fn test_error_keeps_last_known_good() {
        let mut feed = BatchFeedState::new("loc-1");
        let (ticket, _) = feed.start_reload(None);
        feed.complete(ticket, Ok(page_response(&["b1", "b2"], 1, 2)));

        let (ticket, _) = feed.start_load_more().unwrap();
        assert!(feed.complete(ticket, Err("HTTP 502".into())));

        assert!(!feed.is_loading());
        assert_eq!(ids(&feed), vec!["b1", "b2"]);
        assert_eq!(feed.error.as_deref(), Some("HTTP 502"));
        // после ошибки можно повторить
        assert!(feed.start_load_more().is_some());
    }

    // Refresh после мутации — та же перезагрузка с текущим фильтром
    #[test]
    fn test_reload_keeps_current_filter() {
        let mut feed = BatchFeedState::new("loc-1");
        let (ticket, _) = feed.start_reload(Some(BatchFilter::SoldOut));
        feed.complete(ticket, Ok(page_response(&["so-1"], 1, 1)));

        let (_, query) = feed.start_reload(None);
        assert_eq!(query.location_filter, Some(BatchFilter::SoldOut));
        assert_eq!(query.location_page, Some(1));
        assert_eq!(query.location_id.as_deref(), Some("loc-1"));
    }
}
