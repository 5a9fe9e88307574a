use crate::commands::Session;
use crate::error::Result;
use crate::paging::RecordKey;
use crate::services::ledger_service;

/// Confirm and post a reversal for a ledger entry
pub async fn reverse(session: &Session, id: Option<RecordKey>) -> Result<()> {
    if let Some(key) = &id {
        ledger_service::check_reversal(session.ledger.find_cached(key).as_ref())?;
        if !session.confirm(&ledger_service::confirm_prompt(key))? {
            return Ok(());
        }
    }

    let client = session.client.clone();
    let done = session
        .ledger
        .dispatch_action(id.clone(), |key| async move {
            ledger_service::reverse(&client, &key).await
        })
        .await;

    if done.is_ok() {
        if let Some(key) = id {
            println!("✅ Entry #{} reversed", key);
        }
    }
    Ok(())
}
