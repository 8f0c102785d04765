//! Backend resource DTOs for the `/api/v1` relay.
//!
//! DESIGN
//! ======
//! The backend owns these shapes. Decoding is lenient in the ways the backend
//! is known to vary (string or numeric ids, numbers sent as strings, list
//! bodies wrapped in `data`/`items`) and strict about nothing else: unknown
//! fields are ignored and optional fields default.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use access::Role;
use access::wire::{deserialize_id, deserialize_opt_id};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

fn default_true() -> bool {
    true
}

/// Accept `12.5`, `"12.5"` or `null` (as zero).
fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(D::Error::custom),
        Raw::Null(()) => Ok(0.0),
    }
}

fn format_flag(active: bool) -> String {
    if active { "Active".to_owned() } else { "Inactive".to_owned() }
}

/// Trim an ISO-8601 timestamp to its date part for table cells.
pub fn format_date(value: Option<&str>) -> String {
    value.map(|v| v.split('T').next().unwrap_or(v).to_owned()).unwrap_or_default()
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Percentage, e.g. `16.0` for 16%.
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub rate: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Occupancy of a dining table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    #[serde(other)]
    Unknown,
}

impl TableStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Reserved => "Reserved",
            Self::Unknown => "Unknown",
        }
    }

    /// Status a waiter toggles to from this one.
    pub fn toggled(self) -> Self {
        match self {
            Self::Available => Self::Occupied,
            Self::Occupied | Self::Reserved | Self::Unknown => Self::Available,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalTable {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub number: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub branch_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBranch {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub branch_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// SINGLETONS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub total_sales: f64,
    pub orders_today: u64,
    pub active_tables: u64,
    pub total_users: u64,
    pub total_branches: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessSettings {
    pub business_name: String,
    pub currency: String,
    pub tax_included: bool,
    pub receipt_footer: Option<String>,
    #[serde(skip_serializing)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// RESOURCE TRAIT
// =============================================================================

/// A backend collection rendered as a list page.
pub trait ApiResource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path under `/api/v1`.
    const COLLECTION: &'static str;
    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &str;

    /// One display string per entry in `COLUMNS`.
    fn cells(&self) -> Vec<String>;
}

impl ApiResource for Branch {
    const COLLECTION: &'static str = "branches";
    const TITLE: &'static str = "Branches";
    const COLUMNS: &'static [&'static str] = &["Name", "Address", "Phone", "Status", "Created"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            format_flag(self.is_active),
            format_date(self.created_at.as_deref()),
        ]
    }
}

impl ApiResource for Category {
    const COLLECTION: &'static str = "categories";
    const TITLE: &'static str = "Categories";
    const COLUMNS: &'static [&'static str] = &["Name", "Description", "Created"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            format_date(self.created_at.as_deref()),
        ]
    }
}

impl ApiResource for Tax {
    const COLLECTION: &'static str = "taxes";
    const TITLE: &'static str = "Taxes";
    const COLUMNS: &'static [&'static str] = &["Name", "Rate", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), format!("{}%", self.rate), format_flag(self.is_active)]
    }
}

impl ApiResource for PaymentMethod {
    const COLLECTION: &'static str = "payment-methods";
    const TITLE: &'static str = "Payment Methods";
    const COLUMNS: &'static [&'static str] = &["Name", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), format_flag(self.is_active)]
    }
}

impl ApiResource for PhysicalTable {
    const COLLECTION: &'static str = "tables";
    const TITLE: &'static str = "Tables";
    const COLUMNS: &'static [&'static str] = &["Number", "Capacity", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.number.clone(), self.capacity.to_string(), self.status.label().to_owned()]
    }
}

impl ApiResource for UserAccount {
    const COLLECTION: &'static str = "users";
    const TITLE: &'static str = "Users";
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Role", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.role.label().to_owned(), format_flag(self.is_active)]
    }
}

impl ApiResource for UserBranch {
    const COLLECTION: &'static str = "user-branches";
    const TITLE: &'static str = "User Branches";
    const COLUMNS: &'static [&'static str] = &["User", "Branch", "Assigned"];

    fn id(&self) -> &str {
        &self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_name.clone().unwrap_or_else(|| self.user_id.clone()),
            self.branch_name.clone().unwrap_or_else(|| self.branch_id.clone()),
            format_date(self.created_at.as_deref()),
        ]
    }
}

/// Decode a collection body: a bare array, or an object wrapping it in
/// `data` or `items`.
///
/// # Errors
///
/// Returns the serde error message if the body matches none of the shapes.
pub fn decode_list<R: DeserializeOwned>(body: &[u8]) -> Result<Vec<R>, String> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListBody<R> {
        Bare(Vec<R>),
        Data { data: Vec<R> },
        Items { items: Vec<R> },
    }

    match serde_json::from_slice::<ListBody<R>>(body).map_err(|e| e.to_string())? {
        ListBody::Bare(rows) | ListBody::Data { data: rows } | ListBody::Items { items: rows } => Ok(rows),
    }
}

/// Decode a single-object body, unwrapping a `data` envelope when present.
/// An empty body decodes as JSON `null`.
///
/// # Errors
///
/// Returns the serde error message if the body does not match `T`.
pub fn decode_one<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"null").map_err(|e| e.to_string());
    }
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    let inner = match value {
        serde_json::Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| e.to_string())
}
