use crate::commands::Session;
use crate::error::Result;
use crate::paging::RecordKey;
use crate::services::transfer_service::{self, TransferAction, TransferForm};

/// Confirm and run execute/revoke on a transfer
pub async fn act(session: &Session, action: TransferAction, id: Option<RecordKey>) -> Result<()> {
    if let Some(key) = &id {
        transfer_service::check_action(session.transfers.find_cached(key).as_ref(), action)?;
        if !session.confirm(&action.confirm_prompt(key))? {
            return Ok(());
        }
    }

    let client = session.client.clone();
    let done = session
        .transfers
        .dispatch_action(id.clone(), |key| async move {
            transfer_service::perform(&client, action, &key).await
        })
        .await;

    if done.is_ok() {
        if let Some(key) = id {
            println!("✅ {}", action.success_message(&key));
        }
    }
    Ok(())
}

/// Prompt for a new transfer and submit it
pub async fn create(session: &Session) -> Result<()> {
    let prompter = &session.prompter;
    let form = TransferForm {
        account_id: prompter.input("Account ID", None)?,
        amount: prompter.input("Amount (EUR)", None)?,
        direction: prompter.input("Direction (DEBIT/CREDIT)", Some("DEBIT"))?,
        description: prompter.input("Description", None)?,
        external_reference_id: prompter.input("External reference", None)?,
        status: prompter.input("Status", Some("CREATED"))?,
        beneficiary_name: prompter.input("Beneficiary name", None)?,
        transfer_type: prompter.input("Type", Some("SEPA"))?,
    };

    // Validation failures return before the confirmation prompt
    transfer_service::build_create_request(&form)?;
    if !session.confirm("Create this transfer?")? {
        return Ok(());
    }

    match transfer_service::create_transfer(&session.client, &form).await {
        Ok(()) => {
            println!("✅ Transfer created");
            session.transfers.load(0).await;
        }
        Err(e) => println!("❌ Transfer not created: {}", e.user_message()),
    }
    Ok(())
}
