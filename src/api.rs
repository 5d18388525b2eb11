//! REST clients over the negofinanzas backend. Every request goes out with the
//! cached bearer token attached; 401 responses are flagged on the console and
//! surfaced to the caller as a status error.

use gloo_console::warn;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::models::{
    Cuenta, CuentaFilters, CuentaPayload, FileCategory, FileResponse, Pago, PagoFilters, PagoPayload,
    PaginatedCuentas, PaginatedPagos, PaginatedSucursales, QueryParams, StatusChangePayload,
    StatusPago, Sucursal, SucursalFilters, SucursalPayload,
};
use crate::session;

pub const API_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("error de red: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("el backend respondió {0}")]
    Status(u16),
    #[error("no se pudo construir el formulario de archivos")]
    FileForm,
}

async fn authed(builder: RequestBuilder) -> RequestBuilder {
    match session::resolve_token().await {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn ensure_ok(resp: &Response) -> Result<(), ApiError> {
    if resp.status() == 401 {
        warn!("token expirado o inválido");
    }
    if resp.ok() {
        Ok(())
    } else {
        Err(ApiError::Status(resp.status()))
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = authed(Request::get(url).credentials(RequestCredentials::Include))
        .await
        .send()
        .await?;
    ensure_ok(&resp)?;
    Ok(resp.json().await?)
}

async fn post_json<T: DeserializeOwned, B: Serialize>(url: &str, body: &B) -> Result<T, ApiError> {
    let resp = authed(Request::post(url).credentials(RequestCredentials::Include))
        .await
        .json(body)?
        .send()
        .await?;
    ensure_ok(&resp)?;
    Ok(resp.json().await?)
}

async fn patch_json<T: DeserializeOwned, B: Serialize>(url: &str, body: &B) -> Result<T, ApiError> {
    let resp = authed(Request::patch(url).credentials(RequestCredentials::Include))
        .await
        .json(body)?
        .send()
        .await?;
    ensure_ok(&resp)?;
    Ok(resp.json().await?)
}

async fn patch_empty<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = authed(Request::patch(url).credentials(RequestCredentials::Include))
        .await
        .send()
        .await?;
    ensure_ok(&resp)?;
    Ok(resp.json().await?)
}

async fn delete_req(url: &str) -> Result<(), ApiError> {
    let resp = authed(Request::delete(url).credentials(RequestCredentials::Include))
        .await
        .send()
        .await?;
    ensure_ok(&resp)
}

pub struct SucursalesApi;

impl SucursalesApi {
    pub async fn get_all(filters: &SucursalFilters) -> Result<PaginatedSucursales, ApiError> {
        get_json(&format!(
            "{}/sucursales?{}",
            API_BASE_URL,
            filters.to_query()
        ))
        .await
    }

    pub async fn get_by_id(id: i64) -> Result<Sucursal, ApiError> {
        get_json(&format!("{}/sucursales/{}", API_BASE_URL, id)).await
    }

    pub async fn create(data: &SucursalPayload) -> Result<Sucursal, ApiError> {
        post_json(&format!("{}/sucursales", API_BASE_URL), data).await
    }

    pub async fn update(id: i64, data: &SucursalPayload) -> Result<Sucursal, ApiError> {
        patch_json(&format!("{}/sucursales/{}", API_BASE_URL, id), data).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        delete_req(&format!("{}/sucursales/{}", API_BASE_URL, id)).await
    }

    pub async fn toggle_status(id: i64) -> Result<Sucursal, ApiError> {
        patch_empty(&format!("{}/sucursales/{}/toggle-status", API_BASE_URL, id)).await
    }
}

pub struct CuentasApi;

impl CuentasApi {
    pub async fn get_all(filters: &CuentaFilters) -> Result<PaginatedCuentas, ApiError> {
        get_json(&format!("{}/cuentas?{}", API_BASE_URL, filters.to_query())).await
    }

    pub async fn get_by_id(id: i64) -> Result<Cuenta, ApiError> {
        get_json(&format!("{}/cuentas/{}", API_BASE_URL, id)).await
    }

    pub async fn create(data: &CuentaPayload) -> Result<Cuenta, ApiError> {
        post_json(&format!("{}/cuentas", API_BASE_URL), data).await
    }

    pub async fn update(id: i64, data: &CuentaPayload) -> Result<Cuenta, ApiError> {
        patch_json(&format!("{}/cuentas/{}", API_BASE_URL, id), data).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        delete_req(&format!("{}/cuentas/{}", API_BASE_URL, id)).await
    }

    pub async fn toggle_status(id: i64) -> Result<Cuenta, ApiError> {
        patch_empty(&format!("{}/cuentas/{}/toggle-status", API_BASE_URL, id)).await
    }

    /// Active accounts for the selection widgets, unpaginated.
    pub async fn active_list() -> Result<Vec<Cuenta>, ApiError> {
        get_json(&format!("{}/cuentas/active/list", API_BASE_URL)).await
    }

    pub async fn by_numero(numero: &str) -> Result<Cuenta, ApiError> {
        get_json(&format!("{}/cuentas/numero/{}", API_BASE_URL, numero)).await
    }

    pub async fn by_cci(cci: &str) -> Result<Cuenta, ApiError> {
        get_json(&format!("{}/cuentas/cci/{}", API_BASE_URL, cci)).await
    }
}

pub struct PagosApi;

impl PagosApi {
    pub async fn get_all(filters: &PagoFilters) -> Result<PaginatedPagos, ApiError> {
        get_json(&format!("{}/pagos?{}", API_BASE_URL, filters.to_query())).await
    }

    pub async fn get_by_id(id: i64) -> Result<Pago, ApiError> {
        get_json(&format!("{}/pagos/{}", API_BASE_URL, id)).await
    }

    pub async fn create(data: &PagoPayload) -> Result<Pago, ApiError> {
        post_json(&format!("{}/pagos", API_BASE_URL), data).await
    }

    pub async fn update(id: i64, data: &PagoPayload) -> Result<Pago, ApiError> {
        patch_json(&format!("{}/pagos/{}", API_BASE_URL, id), data).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        delete_req(&format!("{}/pagos/{}", API_BASE_URL, id)).await
    }

    /// One-field partial update; the only mutation path for `status`.
    pub async fn change_status(id: i64, status: StatusPago) -> Result<Pago, ApiError> {
        patch_json(
            &format!("{}/pagos/{}/status", API_BASE_URL, id),
            &StatusChangePayload { status },
        )
        .await
    }
}

pub struct FilesApi;

impl FilesApi {
    /// Uploads one file immediately, before the surrounding form is submitted,
    /// and returns the backend-assigned file record.
    pub async fn upload(
        file: &web_sys::File,
        category: FileCategory,
    ) -> Result<FileResponse, ApiError> {
        let form = web_sys::FormData::new().map_err(|_| ApiError::FileForm)?;
        form.append_with_blob("file", file)
            .map_err(|_| ApiError::FileForm)?;
        form.append_with_str("category", category.as_str())
            .map_err(|_| ApiError::FileForm)?;

        let resp = authed(
            Request::post(&format!("{}/files/upload", API_BASE_URL))
                .credentials(RequestCredentials::Include),
        )
        .await
        .body(form)?
        .send()
        .await?;
        ensure_ok(&resp)?;
        Ok(resp.json().await?)
    }

    pub async fn get_all(category: Option<FileCategory>) -> Result<Vec<FileResponse>, ApiError> {
        let mut params = QueryParams::new();
        params.push_opt("category", category.map(|c| c.as_str()));
        let query = params.to_query_string();
        let url = if query.is_empty() {
            format!("{}/files", API_BASE_URL)
        } else {
            format!("{}/files?{}", API_BASE_URL, query)
        };
        get_json(&url).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        delete_req(&format!("{}/files/{}", API_BASE_URL, id)).await
    }

    pub fn file_url(id: i64) -> String {
        format!("{}/files/{}", API_BASE_URL, id)
    }
}
