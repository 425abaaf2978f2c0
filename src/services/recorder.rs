use crate::domain::constants::TRANSACTION_RELEASE;
use crate::domain::models::{RecordId, ReleaseOutcome, ReleaseRecord};
use crate::services::metadata::MetadataStore;
use crate::services::query::Query;
use std::collections::BTreeSet;

/// Inserts a release record for each transaction that has none yet.
///
/// Already-released transactions cost one lookup and no write. The first
/// failed insert aborts the remaining batch.
pub fn record_releases<S: MetadataStore + ?Sized>(
    store: &S,
    transactions: &BTreeSet<RecordId>,
    authorized_person: &RecordId,
) -> anyhow::Result<ReleaseOutcome> {
    let mut outcome = ReleaseOutcome::default();
    for transaction in transactions {
        let lookup = Query::new().eq("transaction", transaction);
        if store.exists(TRANSACTION_RELEASE, &lookup)? {
            tracing::debug!(%transaction, "already released");
            outcome.already_released.push(transaction.clone());
            continue;
        }
        let record = ReleaseRecord {
            authorized_person,
            transaction,
        };
        store.create(TRANSACTION_RELEASE, &serde_json::to_value(&record)?)?;
        tracing::info!(%transaction, %authorized_person, "transaction released");
        outcome.released.push(transaction.clone());
    }
    Ok(outcome)
}
