//! Typed Rust client core for the PaySimple REST API (v4).
//!
//! The crate is split the same way a call flows: a domain layer of models,
//! vocabulary and validation rules, a transport layer for wire-format quirks
//! (enum tables, dates, envelopes), and a client layer that signs, sends and
//! retries requests.
//!
//! ```rust,no_run
//! use paysimple::{
//!     ApiRequest, Credentials, Environment, Method, PaySimpleClient, RecurringPayment,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PaySimpleClient::new(Credentials::from_env()?, Environment::Sandbox)?;
//!
//!     let schedule = RecurringPayment {
//!         account_id: 12,
//!         start_date: Some(chrono::Utc::now() + chrono::Duration::days(1)),
//!         ..Default::default()
//!     };
//!     let created: RecurringPayment = client
//!         .send_validated_and_decode(Method::Post, "recurringpayment", &schedule)
//!         .await?;
//!     println!("created schedule {}", created.id);
//!
//!     let _raw = client.send(ApiRequest::get("customer/1")).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod transport;

pub use client::{
    ApiRequest, ConfigurationError, Credentials, Environment, HttpResponse, Method,
    PaySimpleClient, PaySimpleClientBuilder, PaySimpleError, RetryPolicy, TransportFailure,
};
pub use domain::{
    Address, Customer, EndpointError, PageQuery, PagedResult, Payment, RecurringPayment,
    ResponseEnvelope, Validate, ValidationFailure, Violation, WebhookSubscription, validate,
};
pub use transport::{BiLookup, WireEnum};
