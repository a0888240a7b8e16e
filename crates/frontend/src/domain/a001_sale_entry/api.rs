use contracts::domain::a001_sale_entry::aggregate::SaleEntry;
use contracts::domain::a001_sale_entry::dto::{
    CreateSaleEntryRequest, DailyLedgerDay, LastSaleResponse, UpdateSaleEntryRequest,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::system::auth::api::fetch_with_auth;

/// Pull the server's `{"error": "..."}` message out of an error body,
/// falling back to a generic message with the status code.
fn extract_error(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| format!("Error del servidor ({})", status))
}

async fn send_json<B, T>(
    request: gloo_net::http::RequestBuilder,
    body: &B,
) -> Result<T, String>
where
    B: serde::Serialize,
    T: for<'de> serde::Deserialize<'de>,
{
    let response = request
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(extract_error(&text, response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn create_entry(
    access_token: &str,
    request: &CreateSaleEntryRequest,
) -> Result<SaleEntry, String> {
    send_json(
        Request::post(&api_url("/api/sale-entry"))
            .header("Authorization", &format!("Bearer {}", access_token)),
        request,
    )
    .await
}

pub async fn update_entry(
    access_token: &str,
    id: &str,
    request: &UpdateSaleEntryRequest,
) -> Result<SaleEntry, String> {
    send_json(
        Request::put(&api_url(&format!("/api/sale-entry/{}", id)))
            .header("Authorization", &format!("Bearer {}", access_token)),
        request,
    )
    .await
}

pub async fn delete_entry(access_token: &str, id: &str) -> Result<(), String> {
    let response = Request::delete(&api_url(&format!("/api/sale-entry/{}", id)))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Delete failed: {}", response.status()));
    }
    Ok(())
}

/// Delete every entry of one calendar day, returns the affected count
pub async fn delete_day(access_token: &str, date: &str) -> Result<u64, String> {
    let response = Request::delete(&api_url(&format!("/api/sale-entry/day/{}", date)))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Delete failed: {}", response.status()));
    }

    let value = response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    Ok(value.get("deleted").and_then(|d| d.as_u64()).unwrap_or(0))
}

pub async fn daily_ledger(access_token: &str) -> Result<Vec<DailyLedgerDay>, String> {
    fetch_with_auth("/api/sale-entry/daily", access_token).await
}

pub async fn last_entry(access_token: &str) -> Result<Option<LastSaleResponse>, String> {
    fetch_with_auth("/api/sale-entry/last", access_token).await
}

/// Fetch the CSV export for a date range as raw text
pub async fn export_csv(
    access_token: &str,
    date_from: &str,
    date_to: &str,
) -> Result<String, String> {
    let path = format!(
        "/api/sale-entry/export?date_from={}&date_to={}",
        date_from, date_to
    );
    let response = Request::get(&api_url(&path))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Export failed: {}", response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}
