//! Шлюз к API склада: единственная точка сетевых вызовов карточки остатков.
//!
//! Вся арифметика остатков живёт на сервере; клиент только читает проекции
//! и отправляет мутации. Все запросы идут с сессионной cookie.

use contracts::domain::a001_product::aggregate::{LocationStock, Product};
use contracts::domain::a001_product::requests::{
    ProductListResponse, ProductsQuery, UpsertPricePayload,
};
use contracts::domain::a002_stock_batch::requests::{
    BatchesAndDefectsResponse, BatchesQuery, CreateBatchPayload, DefectPayload, WriteoffPayload,
};
use contracts::projections::p901_stock_movements::dto::{
    MovementHistoryQuery, MovementHistoryResponse, MovementScope,
};
use gloo_net::http::Request;
use web_sys::RequestCredentials;

use crate::shared::api_utils::{api_url, error_from_response};

/// Список товаров каталога
pub async fn fetch_products(query: &ProductsQuery) -> Result<ProductListResponse, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("{e}"))?;
    let response = Request::get(&api_url(&format!("/api/v1/products?{}", qs)))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка разбора ответа: {e}"))
}

/// Товар с агрегированными остатками (без разреза по точкам)
pub async fn fetch_product(product_id: &str) -> Result<Product, String> {
    let response = Request::get(&api_url(&format!(
        "/api/v1/products/{}",
        urlencoding::encode(product_id)
    )))
    .credentials(RequestCredentials::Include)
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if response.status() == 404 {
        return Err("Товар не найден".to_string());
    }
    if !response.ok() {
        return Err(error_from_response(&response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка разбора ответа: {e}"))
}

/// Разрез по точкам продаж; опционально — только одна точка
pub async fn fetch_product_locations(
    product_id: &str,
    location_id: Option<&str>,
) -> Result<Vec<LocationStock>, String> {
    let mut url = format!("/api/v1/products/{}/locations", urlencoding::encode(product_id));
    if let Some(location_id) = location_id {
        url.push_str(&format!("?location_id={}", urlencoding::encode(location_id)));
    }

    let response = Request::get(&api_url(&url))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка разбора ответа: {e}"))
}

/// Комбинированная страница партий и брака
pub async fn fetch_batches_and_defects(
    product_id: &str,
    query: &BatchesQuery,
) -> Result<BatchesAndDefectsResponse, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("{e}"))?;
    let response = Request::get(&api_url(&format!(
        "/api/v1/products/{}/batches?{}",
        urlencoding::encode(product_id),
        qs
    )))
    .credentials(RequestCredentials::Include)
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка разбора ответа: {e}"))
}

/// Оприходовать партию одним атомарным запросом
pub async fn create_batch(product_id: &str, payload: &CreateBatchPayload) -> Result<(), String> {
    let response = Request::post(&api_url(&format!(
        "/api/v1/products/{}/batches",
        urlencoding::encode(product_id)
    )))
    .credentials(RequestCredentials::Include)
    .json(payload)
    .map_err(|e| format!("Ошибка сериализации: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

pub async fn create_defect(stock_id: &str, payload: &DefectPayload) -> Result<(), String> {
    let response = Request::post(&api_url(&format!(
        "/api/v1/stocks/{}/defects",
        urlencoding::encode(stock_id)
    )))
    .credentials(RequestCredentials::Include)
    .json(payload)
    .map_err(|e| format!("Ошибка сериализации: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

pub async fn update_defect(defect_id: &str, payload: &DefectPayload) -> Result<(), String> {
    let response = Request::patch(&api_url(&format!(
        "/api/v1/defects/{}",
        urlencoding::encode(defect_id)
    )))
    .credentials(RequestCredentials::Include)
    .json(payload)
    .map_err(|e| format!("Ошибка сериализации: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

/// Удаление брака в API оформлено как POST
pub async fn remove_defect(defect_id: &str) -> Result<(), String> {
    let response = Request::post(&api_url(&format!(
        "/api/v1/defects/{}/remove",
        urlencoding::encode(defect_id)
    )))
    .credentials(RequestCredentials::Include)
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

pub async fn create_writeoff(stock_id: &str, payload: &WriteoffPayload) -> Result<(), String> {
    let response = Request::post(&api_url(&format!(
        "/api/v1/stocks/{}/writeoffs",
        urlencoding::encode(stock_id)
    )))
    .credentials(RequestCredentials::Include)
    .json(payload)
    .map_err(|e| format!("Ошибка сериализации: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

pub async fn update_writeoff(writeoff_id: &str, payload: &WriteoffPayload) -> Result<(), String> {
    let response = Request::patch(&api_url(&format!(
        "/api/v1/writeoffs/{}",
        urlencoding::encode(writeoff_id)
    )))
    .credentials(RequestCredentials::Include)
    .json(payload)
    .map_err(|e| format!("Ошибка сериализации: {e}"))?
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

pub async fn delete_writeoff(writeoff_id: &str) -> Result<(), String> {
    let response = Request::delete(&api_url(&format!(
        "/api/v1/writeoffs/{}",
        urlencoding::encode(writeoff_id)
    )))
    .credentials(RequestCredentials::Include)
    .send()
    .await
    .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

/// Идемпотентный create-or-replace цены и флагов активности
pub async fn upsert_price(payload: &UpsertPricePayload) -> Result<(), String> {
    let response = Request::post(&api_url("/api/v1/prices"))
        .credentials(RequestCredentials::Include)
        .json(payload)
        .map_err(|e| format!("Ошибка сериализации: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }
    Ok(())
}

fn movements_path(scope: &MovementScope) -> String {
    match scope {
        MovementScope::Stock(id) => {
            format!("/api/v1/stocks/{}/movements", urlencoding::encode(id))
        }
        MovementScope::Price(id) => {
            format!("/api/v1/prices/{}/movements", urlencoding::encode(id))
        }
    }
}

/// Страница журнала движений, сгруппированного по датам
pub async fn fetch_movement_history(
    scope: &MovementScope,
    query: &MovementHistoryQuery,
) -> Result<MovementHistoryResponse, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("{e}"))?;
    let response = Request::get(&api_url(&format!("{}?{}", movements_path(scope), qs)))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка разбора ответа: {e}"))
}

/// Выгрузка журнала движений в xlsx (бинарный ответ)
pub async fn export_movement_history(scope: &MovementScope) -> Result<Vec<u8>, String> {
    let response = Request::get(&api_url(&format!("{}/export", movements_path(scope))))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Сеть недоступна: {e}"))?;

    if !response.ok() {
        return Err(error_from_response(&response).await);
    }

    response
        .binary()
        .await
        .map_err(|e| format!("Ошибка чтения файла: {e}"))
}
