use crate::api::backoffice::PaymentStatus;
use crate::commands::Session;
use crate::error::Result;
use crate::paging::RecordKey;
use crate::services::payment_service::{self, PaymentForm, PaymentScope};

/// List all payments, or those of one account
pub async fn open(session: &Session, account: Option<RecordKey>) {
    let scope = match account {
        Some(account_id) => {
            println!("Payments for account #{}", account_id);
            PaymentScope::Account(account_id)
        }
        None => PaymentScope::All,
    };
    session.payment_source.set_scope(scope);
    session.payments.load(0).await;
}

/// Confirm and apply a status change
pub async fn set_status(session: &Session, id: Option<RecordKey>, status: PaymentStatus) -> Result<()> {
    if let Some(key) = &id {
        if !session.confirm(&payment_service::confirm_prompt(key, status))? {
            return Ok(());
        }
    }

    let client = session.client.clone();
    let done = session
        .payments
        .dispatch_action(id.clone(), |key| async move {
            payment_service::update_status(&client, &key, status).await
        })
        .await;

    if done.is_ok() {
        if let Some(key) = id {
            println!("✅ Payment #{} is now {}", key, status);
        }
    }
    Ok(())
}

/// Prompt for a new system payment and submit it
pub async fn create(session: &Session) -> Result<()> {
    let prompter = &session.prompter;
    let form = PaymentForm {
        account_id: prompter.input("Account ID", None)?,
        amount: prompter.input("Amount", None)?,
        direction: prompter.input("Direction (DEBIT/CREDIT)", Some("CREDIT"))?,
        description: prompter.input("Description", None)?,
        external_reference_id: prompter.input("External reference", None)?,
        status: prompter.input("Status", Some("CREATED"))?,
    };

    payment_service::build_create_request(&form)?;
    if !session.confirm("Create this payment?")? {
        return Ok(());
    }

    match payment_service::create_payment(&session.client, &form).await {
        Ok(()) => {
            println!("✅ Payment created");
            session.payment_source.set_scope(PaymentScope::All);
            session.payments.load(0).await;
        }
        Err(e) => println!("❌ Payment not created: {}", e.user_message()),
    }
    Ok(())
}
