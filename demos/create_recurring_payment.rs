use std::io;

use chrono::{Duration, Utc};
use paysimple::domain::ExecutionFrequencyType;
use paysimple::{Credentials, Environment, Method, PaySimpleClient, PaySimpleError, RecurringPayment};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let account_id: i64 = std::env::var("PAYSIMPLE_ACCOUNT_ID")
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "PAYSIMPLE_ACCOUNT_ID environment variable is required",
            )
        })?
        .parse()?;

    let client = PaySimpleClient::new(Credentials::from_env()?, Environment::Sandbox)?;

    let schedule = RecurringPayment {
        account_id,
        payment_amount: Decimal::new(2500, 2),
        start_date: Some(Utc::now() + Duration::days(1)),
        execution_frequency_type: ExecutionFrequencyType::SpecificDayOfMonth,
        execution_frequency_parameter: Some(15),
        description: Some("Monthly membership".to_owned()),
        ..Default::default()
    };

    match client
        .send_validated_and_decode::<_, RecurringPayment>(Method::Post, "recurringpayment", &schedule)
        .await
    {
        Ok(created) => println!(
            "created schedule {} ({:?})",
            created.id, created.schedule_status
        ),
        Err(PaySimpleError::Validation(failure)) => {
            for violation in failure.violations() {
                eprintln!("{}: {}", violation.field, violation.message);
            }
        }
        Err(PaySimpleError::Endpoint { status, error }) => {
            eprintln!("rejected with HTTP {status}: {error}");
        }
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
