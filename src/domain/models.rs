use crate::domain::constants::{
    DEFAULT_ADMIN_USER_ID, DEFAULT_METADATA_ENDPOINT, DEFAULT_TIMEOUT_SECS, PROPOSALS, TRANSACTIONS,
    TRANS_SAP, TRANS_SIP,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Opaque record identifier as handed out by the metadata service.
///
/// Proposals use text ids and transactions use integers; the original JSON
/// type is preserved when the id is written back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(RecordId::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            _ => None,
        }
    }

    /// Integers win over text so `ADMIN_USER_ID=10` is sent as a number.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map(RecordId::Int)
            .unwrap_or_else(|_| RecordId::Text(raw.to_string()))
    }

    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(i) => Value::from(*i),
            RecordId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Proposals,
    Transactions,
}

impl EntityKind {
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Proposals => PROPOSALS,
            EntityKind::Transactions => TRANSACTIONS,
        }
    }

    pub fn from_collection(name: &str) -> Option<Self> {
        match name {
            PROPOSALS => Some(EntityKind::Proposals),
            TRANSACTIONS => Some(EntityKind::Transactions),
            _ => None,
        }
    }
}

/// Join collections linking a proposal to its transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Sip,
    Sap,
}

impl RelationKind {
    pub const ALL: [RelationKind; 2] = [RelationKind::Sip, RelationKind::Sap];

    pub fn collection(self) -> &'static str {
        match self {
            RelationKind::Sip => TRANS_SIP,
            RelationKind::Sap => TRANS_SAP,
        }
    }
}

/// A validated `<collection>.<date field>` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub kind: EntityKind,
    pub date_field: String,
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind.collection(), self.date_field)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseConfig {
    /// Recorded as `authorized_person` on every release record.
    #[serde(default = "default_admin")]
    pub admin_user_id: RecordId,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            admin_user_id: default_admin(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_METADATA_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_admin() -> RecordId {
    RecordId::Int(DEFAULT_ADMIN_USER_ID)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspenseUpdate {
    pub id: RecordId,
    pub suspense_date: String,
}

#[derive(Debug, Serialize)]
pub struct ReleaseRecord<'a> {
    pub authorized_person: &'a RecordId,
    pub transaction: &'a RecordId,
}

#[derive(Debug, Default, Serialize)]
pub struct ReleaseOutcome {
    pub released: Vec<RecordId>,
    pub already_released: Vec<RecordId>,
}

#[derive(Debug, Serialize)]
pub struct DataReleaseReport {
    pub keyword: String,
    pub suspense_updates: Vec<SuspenseUpdate>,
    pub eligible_transactions: Vec<RecordId>,
    pub released: Vec<RecordId>,
    pub already_released: Vec<RecordId>,
}
