use paysimple::domain::SortDirection;
use paysimple::{ApiRequest, Credentials, Environment, PageQuery, PaySimpleClient, Payment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let client = PaySimpleClient::builder(Credentials::from_env()?)
        .environment(Environment::Sandbox)
        .max_attempts(5)
        .build()?;

    let mut page = 1;
    loop {
        let query = PageQuery::new()
            .page(page)
            .page_size(50)
            .sort_by("PaymentDate")
            .direction(SortDirection::Desc);
        let result = client
            .send_and_decode_paged::<Payment>(ApiRequest::get("payment").with_query(query))
            .await?;

        for payment in &result.items {
            println!(
                "{:>8} {:>10} {:?} {:?}",
                payment.id, payment.amount, payment.status, payment.payment_date
            );
        }

        if !result.paging.has_next_page() {
            break;
        }
        page += 1;
    }

    Ok(())
}
