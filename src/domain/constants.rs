pub const DEFAULT_METADATA_ENDPOINT: &str = "http://127.0.0.1:8121";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ADMIN_USER_ID: i64 = -1;

/// Keywords accepted by `data-release run`, as `<collection>.<date field>`.
pub const VALID_KEYWORDS: [&str; 7] = [
    "proposals.actual_end_date",
    "proposals.actual_start_date",
    "proposals.submitted_date",
    "proposals.accepted_date",
    "proposals.closed_date",
    "transactions.created",
    "transactions.updated",
];

pub const PROPOSALS: &str = "proposals";
pub const TRANSACTIONS: &str = "transactions";
pub const TRANS_SIP: &str = "transsip";
pub const TRANS_SAP: &str = "transsap";
pub const TRANSACTION_RELEASE: &str = "transaction_release";

pub const ID_FIELD: &str = "_id";
pub const SUSPENSE_DATE_FIELD: &str = "suspense_date";

/// Lifecycle fields probed by the window query, in probe order.
pub const LIFECYCLE_FIELDS: [&str; 2] = ["updated", "created"];

/// Wire format for every date this tool writes or filters on.
pub const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
