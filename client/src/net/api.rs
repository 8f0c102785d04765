//! REST helpers for the backend relay at `/api/v1`.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`; the server attaches
//! the bearer token from the session cookie.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` instead of panics so a failed call becomes
//! an inline notice on the calling page.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{ApiResource, BusinessSettings, DashboardStats, TableStatus, UserProfile};
#[cfg(feature = "hydrate")]
use super::types::{decode_list, decode_one};

/// Mount point of the backend relay.
pub const API_BASE: &str = "/api/v1";

#[cfg(any(test, feature = "hydrate"))]
fn api_url(path: &str) -> String {
    format!("{API_BASE}/{}", path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(method: &str, path: &str, status: u16) -> String {
    match status {
        401 => "Your session has expired. Sign in again.".to_owned(),
        403 => "You do not have permission for this action.".to_owned(),
        404 => format!("{method} {path}: not found"),
        _ => format!("{method} {path} failed: {status}"),
    }
}

fn resource_path(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, String> {
    Err("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
async fn read_body(resp: gloo_net::http::Response, method: &str, path: &str) -> Result<Vec<u8>, String> {
    if !resp.ok() {
        let message = request_failed_message(method, path, resp.status());
        log::warn!("{message}");
        return Err(message);
    }
    resp.binary().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn send_json<B, T>(builder: gloo_net::http::RequestBuilder, method: &str, path: &str, body: &B) -> Result<T, String>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let resp = builder
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    decode_one(&read_body(resp, method, path).await?)
}

/// `GET /api/v1/{path}` decoded as `T`.
///
/// # Errors
///
/// Returns an error string if the request fails, the relay answers non-OK,
/// or the body does not decode.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&api_url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        decode_one(&read_body(resp, "GET", path).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        unavailable()
    }
}

/// `POST /api/v1/{path}` with a JSON body.
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json(gloo_net::http::Request::post(&api_url(path)), "POST", path, body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        unavailable()
    }
}

/// `PUT /api/v1/{path}` with a JSON body.
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json(gloo_net::http::Request::put(&api_url(path)), "PUT", path, body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        unavailable()
    }
}

/// `PATCH /api/v1/{path}` with a JSON body.
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn patch_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json(gloo_net::http::Request::patch(&api_url(path)), "PATCH", path, body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (path, body);
        unavailable()
    }
}

/// `DELETE /api/v1/{path}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the relay answers non-OK.
pub async fn delete(path: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&api_url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_body(resp, "DELETE", path).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
        unavailable()
    }
}

// =============================================================================
// TYPED WRAPPERS
// =============================================================================

/// List every row of a resource collection.
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn list<R: ApiResource>() -> Result<Vec<R>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&api_url(R::COLLECTION))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        decode_list(&read_body(resp, "GET", R::COLLECTION).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Delete one row of a resource collection.
///
/// # Errors
///
/// Returns an error string if the backend refuses or cannot be reached.
pub async fn delete_resource<R: ApiResource>(id: &str) -> Result<(), String> {
    delete(&resource_path(R::COLLECTION, id)).await
}

/// Create a row from a name-only payload (categories, payment methods).
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn create_named<R: ApiResource>(name: &str) -> Result<R, String> {
    post_json(R::COLLECTION, &serde_json::json!({ "name": name })).await
}

/// Set a table's occupancy.
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn update_table_status(id: &str, status: TableStatus) -> Result<(), String> {
    let _: serde_json::Value = patch_json(&resource_path("tables", id), &serde_json::json!({ "status": status })).await?;
    Ok(())
}

/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn fetch_dashboard_stats() -> Result<DashboardStats, String> {
    get_json("dashboard/stats").await
}

/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn fetch_settings() -> Result<BusinessSettings, String> {
    get_json("settings").await
}

/// Save business settings. The backend may answer with the stored settings
/// or an empty body; either way the caller's value is returned.
///
/// # Errors
///
/// Returns an error string on transport or status failure.
pub async fn update_settings(settings: &BusinessSettings) -> Result<BusinessSettings, String> {
    let stored: Option<BusinessSettings> = put_json("settings", settings).await?;
    Ok(stored.unwrap_or_else(|| settings.clone()))
}

/// Full profile of the signed-in user.
///
/// # Errors
///
/// Returns an error string on transport, status or decode failure.
pub async fn fetch_profile() -> Result<UserProfile, String> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum ProfileBody {
        Wrapped { user: UserProfile },
        Bare(UserProfile),
    }

    match get_json::<ProfileBody>("auth/profile").await? {
        ProfileBody::Wrapped { user } | ProfileBody::Bare(user) => Ok(user),
    }
}
