//! Wire types and the pure rules of the back office: entities, filter records,
//! query-string construction, status lifecycle and upload gating.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPago {
    Pendiente,
    Aprobado,
    Rechazado,
    Pagado,
}

impl StatusPago {
    pub const ALL: [StatusPago; 4] = [
        StatusPago::Pendiente,
        StatusPago::Aprobado,
        StatusPago::Rechazado,
        StatusPago::Pagado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusPago::Pendiente => "pendiente",
            StatusPago::Aprobado => "aprobado",
            StatusPago::Rechazado => "rechazado",
            StatusPago::Pagado => "pagado",
        }
    }

    pub fn parse(value: &str) -> Option<StatusPago> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusPago::Pendiente => "Pendiente",
            StatusPago::Aprobado => "Aprobado",
            StatusPago::Rechazado => "Rechazado",
            StatusPago::Pagado => "Pagado",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            StatusPago::Pendiente => "bg-yellow-100 text-yellow-800",
            StatusPago::Aprobado => "bg-green-100 text-green-800",
            StatusPago::Rechazado => "bg-red-100 text-red-800",
            StatusPago::Pagado => "bg-blue-100 text-blue-800",
        }
    }

    /// Target statuses offered by the change-status action. The backend accepts
    /// any transition, so everything except the current status is offered.
    pub fn transition_targets(self) -> Vec<StatusPago> {
        Self::ALL.into_iter().filter(|s| *s != self).collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Moneda {
    PEN,
    USD,
    EUR,
}

impl Moneda {
    pub const ALL: [Moneda; 3] = [Moneda::PEN, Moneda::USD, Moneda::EUR];

    pub fn as_str(self) -> &'static str {
        match self {
            Moneda::PEN => "PEN",
            Moneda::USD => "USD",
            Moneda::EUR => "EUR",
        }
    }

    pub fn parse(value: &str) -> Option<Moneda> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Moneda::PEN => "Soles (PEN)",
            Moneda::USD => "Dólares (USD)",
            Moneda::EUR => "Euros (EUR)",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Moneda::PEN => "S/.",
            Moneda::USD => "$",
            Moneda::EUR => "€",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoCuenta {
    Ahorros,
    Corriente,
    PlazoFijo,
    Empresa,
}

impl TipoCuenta {
    pub const ALL: [TipoCuenta; 4] = [
        TipoCuenta::Ahorros,
        TipoCuenta::Corriente,
        TipoCuenta::PlazoFijo,
        TipoCuenta::Empresa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TipoCuenta::Ahorros => "AHORROS",
            TipoCuenta::Corriente => "CORRIENTE",
            TipoCuenta::PlazoFijo => "PLAZO_FIJO",
            TipoCuenta::Empresa => "EMPRESA",
        }
    }

    pub fn parse(value: &str) -> Option<TipoCuenta> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            TipoCuenta::Ahorros => "Ahorros",
            TipoCuenta::Corriente => "Corriente",
            TipoCuenta::PlazoFijo => "Plazo Fijo",
            TipoCuenta::Empresa => "Empresa",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Option<SortOrder> {
        match value {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Upload category understood by the file store.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FileCategory {
    Voucher,
    Document,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Voucher => "voucher",
            FileCategory::Document => "document",
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sucursal {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Embedded branch summary carried by Cuenta and Pago responses.
#[derive(Clone, PartialEq, Deserialize)]
pub struct SucursalRef {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cuenta {
    pub id: i64,
    #[serde(default)]
    pub titular: String,
    #[serde(default)]
    pub numero_cuenta: String,
    #[serde(default)]
    pub cci: String,
    pub moneda: Option<Moneda>,
    pub tipo: Option<TipoCuenta>,
    pub banco: Option<String>,
    #[serde(default)]
    pub es_empresa: bool,
    #[serde(default)]
    pub propia_empresa: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub sucursal_id: Option<i64>,
    pub sucursal: Option<SucursalRef>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct CuentaRef {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub numero: String,
    #[serde(default)]
    pub tipo: String,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: i64,
    pub original_name: String,
    pub filename: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub mimetype: String,
    #[serde(default)]
    pub size: u64,
    pub category: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pago {
    pub id: i64,
    pub descripcion: String,
    pub justificacion: Option<String>,
    pub coordinado_con: Option<String>,
    pub total: f64,
    pub moneda: Moneda,
    pub status: StatusPago,
    pub sucursal_id: Option<i64>,
    pub sucursal: Option<SucursalRef>,
    pub cuenta_destino_id: Option<i64>,
    pub cuenta_destino: Option<CuentaRef>,
    pub cuenta_propia_empresa_id: Option<i64>,
    pub cuenta_propia_empresa: Option<CuentaRef>,
    pub voucher_file: Option<FileResponse>,
    #[serde(default)]
    pub document_files: Vec<FileResponse>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Mutation payloads
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SucursalPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_active: bool,
}

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CuentaPayload {
    pub titular: String,
    pub numero_cuenta: String,
    pub cci: String,
    pub moneda: Moneda,
    pub tipo: TipoCuenta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banco: Option<String>,
    pub es_empresa: bool,
    pub propia_empresa: bool,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sucursal_id: Option<i64>,
}

/// Create/update body for a Pago. There is deliberately no `status` field here:
/// status only moves through the dedicated change-status action.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagoPayload {
    pub descripcion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justificacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinado_con: Option<String>,
    pub total: f64,
    pub moneda: Moneda,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sucursal_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuenta_destino_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuenta_propia_empresa_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_file_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_file_ids: Option<Vec<i64>>,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct StatusChangePayload {
    pub status: StatusPago,
}

// ---------------------------------------------------------------------------
// Query-string construction
// ---------------------------------------------------------------------------

/// Ordered key/value pairs for a list request. Mirrors `URLSearchParams`:
/// empty values are never appended, everything else is coerced to a string.
#[derive(Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        if value.is_empty() {
            return;
        }
        self.pairs.push((key.to_string(), value));
    }

    pub fn push_opt(&mut self, key: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// Filter records. Every setter except `with_page` resets the page to 1.
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Debug)]
pub struct SucursalFilters {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub page: u32,
    pub limit: u32,
}

impl Default for SucursalFilters {
    fn default() -> Self {
        Self {
            name: None,
            is_active: None,
            sort_by: None,
            sort_order: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SucursalFilters {
    pub fn with_name(mut self, value: &str) -> Self {
        self.name = non_empty(value);
        self.page = 1;
        self
    }

    pub fn with_is_active(mut self, value: Option<bool>) -> Self {
        self.is_active = value;
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, by: Option<String>, order: Option<SortOrder>) -> Self {
        self.sort_by = by;
        self.sort_order = order;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn to_query(&self) -> String {
        let mut params = QueryParams::new();
        params.push_opt("name", self.name.as_deref());
        params.push_opt("isActive", self.is_active);
        params.push_opt("sortBy", self.sort_by.as_deref());
        params.push_opt("sortOrder", self.sort_order.map(|o| o.as_str()));
        params.push("page", self.page);
        params.push("limit", self.limit);
        params.to_query_string()
    }
}

/// Three-way branch scope for the Cuentas list. "Todas" omits the key,
/// "Globales" asks the backend for rows with no branch assigned.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SucursalScope {
    #[default]
    Todas,
    Globales,
    Sucursal(i64),
}

impl SucursalScope {
    pub fn from_value(value: &str) -> Self {
        match value {
            "" => SucursalScope::Todas,
            "null" => SucursalScope::Globales,
            other => other
                .parse()
                .map(SucursalScope::Sucursal)
                .unwrap_or(SucursalScope::Todas),
        }
    }

    pub fn as_value(&self) -> String {
        match self {
            SucursalScope::Todas => String::new(),
            SucursalScope::Globales => "null".to_string(),
            SucursalScope::Sucursal(id) => id.to_string(),
        }
    }

    pub fn query_value(&self) -> Option<String> {
        match self {
            SucursalScope::Todas => None,
            SucursalScope::Globales => Some("null".to_string()),
            SucursalScope::Sucursal(id) => Some(id.to_string()),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct CuentaFilters {
    pub search: Option<String>,
    pub moneda: Option<Moneda>,
    pub tipo: Option<TipoCuenta>,
    pub banco: Option<String>,
    pub es_empresa: Option<bool>,
    pub is_active: Option<bool>,
    pub sucursal: SucursalScope,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub page: u32,
    pub limit: u32,
}

impl Default for CuentaFilters {
    fn default() -> Self {
        Self {
            search: None,
            moneda: None,
            tipo: None,
            banco: None,
            es_empresa: None,
            is_active: None,
            sucursal: SucursalScope::Todas,
            sort_by: None,
            sort_order: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CuentaFilters {
    pub fn with_search(mut self, value: &str) -> Self {
        self.search = non_empty(value);
        self.page = 1;
        self
    }

    pub fn with_moneda(mut self, value: Option<Moneda>) -> Self {
        self.moneda = value;
        self.page = 1;
        self
    }

    pub fn with_tipo(mut self, value: Option<TipoCuenta>) -> Self {
        self.tipo = value;
        self.page = 1;
        self
    }

    pub fn with_banco(mut self, value: &str) -> Self {
        self.banco = non_empty(value);
        self.page = 1;
        self
    }

    pub fn with_es_empresa(mut self, value: Option<bool>) -> Self {
        self.es_empresa = value;
        self.page = 1;
        self
    }

    pub fn with_is_active(mut self, value: Option<bool>) -> Self {
        self.is_active = value;
        self.page = 1;
        self
    }

    pub fn with_sucursal(mut self, value: SucursalScope) -> Self {
        self.sucursal = value;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn to_query(&self) -> String {
        let mut params = QueryParams::new();
        params.push_opt("search", self.search.as_deref());
        params.push_opt("moneda", self.moneda.map(|m| m.as_str()));
        params.push_opt("tipo", self.tipo.map(|t| t.as_str()));
        params.push_opt("banco", self.banco.as_deref());
        params.push_opt("esEmpresa", self.es_empresa);
        params.push_opt("isActive", self.is_active);
        params.push_opt("sucursalId", self.sucursal.query_value());
        params.push_opt("sortBy", self.sort_by.as_deref());
        params.push_opt("sortOrder", self.sort_order.map(|o| o.as_str()));
        params.push("page", self.page);
        params.push("limit", self.limit);
        params.to_query_string()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct PagoFilters {
    pub search: Option<String>,
    pub status: Option<StatusPago>,
    pub moneda: Option<Moneda>,
    pub sucursal_id: Option<i64>,
    pub cuenta_destino_id: Option<i64>,
    pub cuenta_propia_empresa_id: Option<i64>,
    pub monto_min: Option<f64>,
    pub monto_max: Option<f64>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for PagoFilters {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            moneda: None,
            sucursal_id: None,
            cuenta_destino_id: None,
            cuenta_propia_empresa_id: None,
            monto_min: None,
            monto_max: None,
            fecha_desde: None,
            fecha_hasta: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagoFilters {
    pub fn with_search(mut self, value: &str) -> Self {
        self.search = non_empty(value);
        self.page = 1;
        self
    }

    pub fn with_status(mut self, value: Option<StatusPago>) -> Self {
        self.status = value;
        self.page = 1;
        self
    }

    pub fn with_moneda(mut self, value: Option<Moneda>) -> Self {
        self.moneda = value;
        self.page = 1;
        self
    }

    pub fn with_sucursal_id(mut self, value: Option<i64>) -> Self {
        self.sucursal_id = value;
        self.page = 1;
        self
    }

    pub fn with_monto_min(mut self, value: Option<f64>) -> Self {
        self.monto_min = value;
        self.page = 1;
        self
    }

    pub fn with_monto_max(mut self, value: Option<f64>) -> Self {
        self.monto_max = value;
        self.page = 1;
        self
    }

    pub fn with_fecha_desde(mut self, value: &str) -> Self {
        self.fecha_desde = non_empty(value);
        self.page = 1;
        self
    }

    pub fn with_fecha_hasta(mut self, value: &str) -> Self {
        self.fecha_hasta = non_empty(value);
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn to_query(&self) -> String {
        let mut params = QueryParams::new();
        params.push_opt("search", self.search.as_deref());
        params.push_opt("status", self.status.map(|s| s.as_str()));
        params.push_opt("moneda", self.moneda.map(|m| m.as_str()));
        params.push_opt("sucursalId", self.sucursal_id);
        params.push_opt("cuentaDestinoId", self.cuenta_destino_id);
        params.push_opt("cuentaPropiaEmpresaId", self.cuenta_propia_empresa_id);
        params.push_opt("montoMin", self.monto_min);
        params.push_opt("montoMax", self.monto_max);
        params.push_opt("fechaDesde", self.fecha_desde.as_deref());
        params.push_opt("fechaHasta", self.fecha_hasta.as_deref());
        params.push("page", self.page);
        params.push("limit", self.limit);
        params.to_query_string()
    }
}

// ---------------------------------------------------------------------------
// Paginated responses
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedSucursales {
    pub data: Vec<Sucursal>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// The Cuentas endpoint nests its pagination block, unlike the other two lists.
#[derive(Clone, PartialEq, Deserialize)]
pub struct PaginatedCuentas {
    pub data: Vec<Cuenta>,
    pub pagination: Pagination,
}

/// The Pagos endpoint does not return `totalPages`; it is derived client-side.
#[derive(Clone, PartialEq, Deserialize)]
pub struct PaginatedPagos {
    pub data: Vec<Pago>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
}

impl PaginatedPagos {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }
}

pub fn total_pages(total: u32, limit: u32) -> u32 {
    if limit == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

// ---------------------------------------------------------------------------
// Lifecycle rules
// ---------------------------------------------------------------------------

/// Only back-office administrators may move a payment through its lifecycle.
/// The control is hidden for everyone else, not merely disabled.
pub fn can_change_status(role: &str) -> bool {
    matches!(
        role.to_ascii_lowercase().as_str(),
        "admin" | "superadmin"
    )
}

/// The voucher is proof of payment: it can only be attached once the payment
/// exists and has been approved.
pub fn voucher_upload_enabled(pago: Option<&Pago>) -> bool {
    matches!(pago, Some(p) if p.status == StatusPago::Aprobado)
}

pub fn voucher_hint(pago: Option<&Pago>) -> Option<&'static str> {
    match pago {
        None => Some("El voucher solo puede ser subido cuando el pago esté aprobado (durante la actualización)"),
        Some(p) if p.status != StatusPago::Aprobado => {
            Some("El voucher solo puede ser subido cuando el pago esté aprobado")
        }
        Some(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Client-side validation
// ---------------------------------------------------------------------------

pub fn validate_sucursal(name: &str, code: &str, phone: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return Some("El nombre es requerido".to_string());
    }
    if name.chars().count() > 100 {
        return Some("El nombre no puede tener más de 100 caracteres".to_string());
    }
    if code.chars().count() > 20 {
        return Some("El código no puede tener más de 20 caracteres".to_string());
    }
    if phone.chars().count() > 20 {
        return Some("El teléfono no puede tener más de 20 caracteres".to_string());
    }
    None
}

pub fn validate_pago(descripcion: &str, total: f64) -> Option<String> {
    if descripcion.trim().is_empty() {
        return Some("La descripción es requerida".to_string());
    }
    if !(total > 0.0) {
        return Some("El monto debe ser mayor a 0".to_string());
    }
    None
}

pub fn validate_cuenta(titular: &str, numero_cuenta: &str) -> Option<String> {
    if titular.trim().is_empty() {
        return Some("El titular es requerido".to_string());
    }
    if numero_cuenta.trim().is_empty() {
        return Some("El número de cuenta es requerido".to_string());
    }
    None
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let frac = cents % 100;
    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, group_thousands(units), frac)
}

pub fn format_money(value: f64, moneda: Moneda) -> String {
    format!("{} {}", moneda.symbol(), format_amount(value))
}

/// ISO timestamp to `dd/mm/yyyy`; anything unparseable is shown as-is.
pub fn format_date(iso: &str) -> String {
    let date = iso.split('T').next().unwrap_or(iso);
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if numeric(y) && numeric(m) && numeric(d) => {
            format!("{}/{}/{}", d, m, y)
        }
        _ => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pago_with_status(status: StatusPago) -> Pago {
        Pago {
            id: 7,
            descripcion: "Pago a proveedor".to_string(),
            justificacion: None,
            coordinado_con: None,
            total: 150.50,
            moneda: Moneda::PEN,
            status,
            sucursal_id: None,
            sucursal: None,
            cuenta_destino_id: None,
            cuenta_destino: None,
            cuenta_propia_empresa_id: None,
            cuenta_propia_empresa: None,
            voucher_file: None,
            document_files: vec![],
            created_at: "2026-08-30T10:00:00.000Z".to_string(),
            updated_at: "2026-08-30T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn query_omits_empty_and_absent_values() {
        let filters = PagoFilters::default()
            .with_search("")
            .with_fecha_desde("")
            .with_moneda(Some(Moneda::USD));
        let query = filters.to_query();
        assert!(!query.contains("search="));
        assert!(!query.contains("fechaDesde="));
        assert!(query.contains("moneda=USD"));
        assert!(query.contains("page=1"));
        assert!(query.contains("limit=10"));
    }

    #[test]
    fn query_includes_false_booleans() {
        let filters = CuentaFilters::default().with_es_empresa(Some(false));
        assert!(filters.to_query().contains("esEmpresa=false"));
    }

    #[test]
    fn query_coerces_numbers_to_strings() {
        let filters = PagoFilters::default()
            .with_monto_min(Some(100.0))
            .with_monto_max(Some(200.5));
        let query = filters.to_query();
        assert!(query.contains("montoMin=100"));
        assert!(query.contains("montoMax=200.5"));
    }

    #[test]
    fn changing_a_filter_resets_the_page() {
        let filters = PagoFilters::default()
            .with_status(Some(StatusPago::Aprobado))
            .with_page(3)
            .with_moneda(Some(Moneda::USD));
        assert_eq!(filters.page, 1);
        assert_eq!(filters.status, Some(StatusPago::Aprobado));
        assert_eq!(filters.moneda, Some(Moneda::USD));
    }

    #[test]
    fn changing_only_the_page_preserves_filters() {
        let filters = PagoFilters::default()
            .with_search("proveedor")
            .with_status(Some(StatusPago::Pendiente))
            .with_page(4);
        assert_eq!(filters.page, 4);
        assert_eq!(filters.search.as_deref(), Some("proveedor"));
        assert_eq!(filters.status, Some(StatusPago::Pendiente));
    }

    #[test]
    fn query_encodes_reserved_characters() {
        let filters = CuentaFilters::default().with_search("a&b =c");
        assert!(filters.to_query().contains("search=a%26b%20%3Dc"));
    }

    #[test]
    fn date_range_filters_emit_wire_keys() {
        let filters = PagoFilters::default()
            .with_fecha_desde("2026-01-01")
            .with_fecha_hasta("2026-12-31");
        let query = filters.to_query();
        assert!(query.contains("fechaDesde=2026-01-01"));
        assert!(query.contains("fechaHasta=2026-12-31"));
    }

    #[test]
    fn sort_options_emit_wire_keys_and_reset_page() {
        let filters = SucursalFilters::default()
            .with_page(3)
            .with_sort(Some("createdAt".to_string()), Some(SortOrder::Desc));
        let query = filters.to_query();
        assert!(query.contains("sortBy=createdAt"));
        assert!(query.contains("sortOrder=DESC"));
        assert_eq!(filters.page, 1);
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("asc"), None);
    }

    #[test]
    fn file_categories_use_singular_wire_names() {
        assert_eq!(FileCategory::Voucher.as_str(), "voucher");
        assert_eq!(FileCategory::Document.as_str(), "document");
    }

    #[test]
    fn sucursal_scope_maps_to_three_query_behaviors() {
        let todas = CuentaFilters::default().with_sucursal(SucursalScope::Todas);
        assert!(!todas.to_query().contains("sucursalId"));

        let globales = CuentaFilters::default().with_sucursal(SucursalScope::Globales);
        assert!(globales.to_query().contains("sucursalId=null"));

        let branch = CuentaFilters::default().with_sucursal(SucursalScope::Sucursal(12));
        assert!(branch.to_query().contains("sucursalId=12"));
    }

    #[test]
    fn sucursal_scope_round_trips_select_values() {
        assert_eq!(SucursalScope::from_value(""), SucursalScope::Todas);
        assert_eq!(SucursalScope::from_value("null"), SucursalScope::Globales);
        assert_eq!(SucursalScope::from_value("5"), SucursalScope::Sucursal(5));
        assert_eq!(SucursalScope::Sucursal(5).as_value(), "5");
    }

    #[test]
    fn transition_targets_exclude_current_status() {
        for status in StatusPago::ALL {
            let targets = status.transition_targets();
            assert_eq!(targets.len(), 3);
            assert!(!targets.contains(&status));
        }
    }

    #[test]
    fn status_change_restricted_to_admin_roles() {
        assert!(can_change_status("admin"));
        assert!(can_change_status("superadmin"));
        assert!(can_change_status("ADMIN"));
        assert!(!can_change_status("user"));
        assert!(!can_change_status("operador"));
        assert!(!can_change_status(""));
    }

    #[test]
    fn voucher_only_on_existing_approved_payment() {
        assert!(!voucher_upload_enabled(None));
        assert!(voucher_hint(None).is_some());

        let pendiente = pago_with_status(StatusPago::Pendiente);
        assert!(!voucher_upload_enabled(Some(&pendiente)));
        assert!(voucher_hint(Some(&pendiente)).is_some());

        let aprobado = pago_with_status(StatusPago::Aprobado);
        assert!(voucher_upload_enabled(Some(&aprobado)));
        assert!(voucher_hint(Some(&aprobado)).is_none());

        let pagado = pago_with_status(StatusPago::Pagado);
        assert!(!voucher_upload_enabled(Some(&pagado)));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn status_serializes_with_lowercase_wire_names() {
        let body = serde_json::to_string(&StatusChangePayload {
            status: StatusPago::Aprobado,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"aprobado"}"#);

        let parsed: StatusPago = serde_json::from_str(r#""pagado""#).unwrap();
        assert_eq!(parsed, StatusPago::Pagado);
    }

    #[test]
    fn pago_payload_never_carries_status() {
        let payload = PagoPayload {
            descripcion: "Compra de útiles".to_string(),
            justificacion: None,
            coordinado_con: None,
            total: 150.50,
            moneda: Moneda::PEN,
            sucursal_id: None,
            cuenta_destino_id: None,
            cuenta_propia_empresa_id: None,
            voucher_file_id: None,
            document_file_ids: None,
        };
        let body = serde_json::to_string(&payload).unwrap();
        assert!(!body.contains("status"));
        assert!(!body.contains("sucursalId"));
        assert!(body.contains(r#""total":150.5"#));
    }

    #[test]
    fn pago_deserializes_wire_shape() {
        let raw = r#"{
            "id": 42,
            "descripcion": "Pago general",
            "total": 150.5,
            "moneda": "PEN",
            "status": "pendiente",
            "sucursalId": null,
            "documentFiles": [],
            "createdAt": "2026-08-30T10:00:00.000Z",
            "updatedAt": "2026-08-30T10:05:00.000Z"
        }"#;
        let pago: Pago = serde_json::from_str(raw).unwrap();
        assert_eq!(pago.id, 42);
        assert_eq!(pago.status, StatusPago::Pendiente);
        assert!(pago.sucursal_id.is_none());
        assert_eq!(pago.moneda, Moneda::PEN);
    }

    #[test]
    fn tipo_cuenta_uses_screaming_wire_names() {
        assert_eq!(
            serde_json::to_string(&TipoCuenta::PlazoFijo).unwrap(),
            r#""PLAZO_FIJO""#
        );
        assert_eq!(TipoCuenta::parse("AHORROS"), Some(TipoCuenta::Ahorros));
    }

    #[test]
    fn sucursal_validation_enforces_length_caps() {
        assert!(validate_sucursal("Lima Centro", "LC01", "987654321").is_none());
        assert!(validate_sucursal("", "", "").is_some());
        assert!(validate_sucursal(&"x".repeat(101), "", "").is_some());
        assert!(validate_sucursal("ok", &"c".repeat(21), "").is_some());
        assert!(validate_sucursal("ok", "", &"9".repeat(21)).is_some());
    }

    #[test]
    fn pago_validation_requires_positive_total() {
        assert!(validate_pago("Pago", 150.50).is_none());
        assert!(validate_pago("  ", 10.0).is_some());
        assert!(validate_pago("Pago", 0.0).is_some());
        assert!(validate_pago("Pago", -3.0).is_some());
    }

    #[test]
    fn amounts_format_with_grouping_and_cents() {
        assert_eq!(format_amount(150.5), "150.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_money(150.5, Moneda::PEN), "S/. 150.50");
        assert_eq!(format_money(99.0, Moneda::EUR), "€ 99.00");
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date("2026-08-30T10:00:00.000Z"), "30/08/2026");
        assert_eq!(format_date("not-a-date"), "not-a-date");
    }
}
