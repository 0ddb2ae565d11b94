use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::validation::{Rules, Validate, rules};
use crate::domain::vocabulary::{
    ExecutionFrequencyType, PaymentStatus, PaymentType, ScheduleStatus, StateCode,
    WebhookEventType,
};
use crate::transport::{WireEnum, wire_enum};

/// Postal address attached to a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    pub street_address1: Option<String>,
    pub street_address2: Option<String>,
    pub city: Option<String>,
    pub state_code: StateCode,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Validate for Address {
    fn rules(&self, rules: &mut Rules) {
        rules
            .require_text("StreetAddress1", self.street_address1.as_deref())
            .max_length("StreetAddress1", self.street_address1.as_deref(), 100)
            .max_length("StreetAddress2", self.street_address2.as_deref(), 100)
            .require_text("City", self.city.as_deref())
            .max_length("City", self.city.as_deref(), 100)
            .check(
                "StateCode",
                !self.state_code.is_unspecified(),
                "StateCode is required",
                &self.state_code,
            )
            .require_text("ZipCode", self.zip_code.as_deref());
    }
}

/// A payer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Customer {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub shipping_same_as_billing: bool,
    #[serde(with = "crate::transport::wire_date")]
    pub created_on: Option<DateTime<Utc>>,
}

impl Validate for Customer {
    fn rules(&self, rules: &mut Rules) {
        rules
            .require_text("FirstName", self.first_name.as_deref())
            .max_length("FirstName", self.first_name.as_deref(), 150)
            .require_text("LastName", self.last_name.as_deref())
            .max_length("LastName", self.last_name.as_deref(), 150)
            .max_length("Company", self.company.as_deref(), 50)
            .when(self.email.is_some(), |guarded| {
                let email = self.email.as_deref().unwrap_or_default();
                guarded.check("Email", rules::is_email(email), "Email is invalid", email);
            })
            .when(self.phone.is_some(), |guarded| {
                let phone = self.phone.as_deref().unwrap_or_default();
                guarded.check(
                    "Phone",
                    rules::is_phone_number(phone),
                    "Phone is not a valid phone number",
                    phone,
                );
            })
            .nested("BillingAddress", self.billing_address.as_ref())
            .when(!self.shipping_same_as_billing, |guarded| {
                guarded.nested("ShippingAddress", self.shipping_address.as_ref());
            });
    }
}

/// A recurring payment schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RecurringPayment {
    pub id: i64,
    pub customer_id: i64,
    pub account_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub payment_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub first_payment_amount: Option<Decimal>,
    #[serde(with = "crate::transport::wire_date")]
    pub first_payment_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::transport::wire_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::transport::wire_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub execution_frequency_type: ExecutionFrequencyType,
    pub execution_frequency_parameter: Option<u8>,
    pub schedule_status: ScheduleStatus,
    pub description: Option<String>,
    pub invoice_number: Option<String>,
}

impl Validate for RecurringPayment {
    fn rules(&self, rules: &mut Rules) {
        let now = Utc::now();
        rules
            .require_id("AccountId", self.account_id)
            .require_present("StartDate", &self.start_date.map(|at| at.to_rfc3339()))
            .check(
                "PaymentAmount",
                !self.payment_amount.is_sign_negative(),
                "PaymentAmount must not be negative",
                &self.payment_amount.to_string(),
            )
            .max_length("Description", self.description.as_deref(), 2048)
            .max_length("InvoiceNumber", self.invoice_number.as_deref(), 50);

        if let Some(start) = self.start_date {
            rules.check(
                "StartDate",
                rules::is_not_before_today(start, now),
                "StartDate must not be in the past",
                &start.to_rfc3339(),
            );
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            rules.check(
                "EndDate",
                end > start,
                "EndDate must be after StartDate",
                &end.to_rfc3339(),
            );
        }

        rules
            .when(self.first_payment_amount.is_some(), |guarded| {
                guarded.require_present(
                    "FirstPaymentDate",
                    &self.first_payment_date.map(|at| at.to_rfc3339()),
                );
            })
            .when(
                self.execution_frequency_type == ExecutionFrequencyType::SpecificDayOfMonth,
                |guarded| {
                    let day = self.execution_frequency_parameter;
                    guarded.check_with_state(
                        "ExecutionFrequencyParameter",
                        day.is_some_and(|day| (1..=31).contains(&day)),
                        "ExecutionFrequencyParameter must be a day of the month",
                        &day,
                        serde_json::json!({ "min": 1, "max": 31 }),
                    );
                },
            )
            .when(
                matches!(
                    self.execution_frequency_type,
                    ExecutionFrequencyType::Weekly | ExecutionFrequencyType::BiWeekly
                ),
                |guarded| {
                    let day = self.execution_frequency_parameter;
                    guarded.check_with_state(
                        "ExecutionFrequencyParameter",
                        day.is_some_and(|day| (1..=7).contains(&day)),
                        "ExecutionFrequencyParameter must be a day of the week",
                        &day,
                        serde_json::json!({ "min": 1, "max": 7 }),
                    );
                },
            );
    }
}

/// A single payment as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Payment {
    pub id: i64,
    pub customer_id: i64,
    pub account_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    #[serde(with = "crate::transport::wire_date")]
    pub payment_date: Option<DateTime<Utc>>,
    pub recurring_schedule_id: i64,
    pub description: Option<String>,
    pub invoice_number: Option<String>,
}

impl Validate for Payment {
    fn rules(&self, rules: &mut Rules) {
        rules
            .require_id("AccountId", self.account_id)
            .check(
                "Amount",
                self.amount > Decimal::ZERO,
                "Amount must be greater than zero",
                &self.amount.to_string(),
            )
            .max_length("Description", self.description.as_deref(), 2048)
            .max_length("InvoiceNumber", self.invoice_number.as_deref(), 50);
    }
}

/// Endpoint notified of the listed event types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WebhookSubscription {
    pub id: i64,
    pub url: Option<String>,
    #[serde(with = "wire_enum::list")]
    pub event_types: Vec<WebhookEventType>,
    pub is_active: bool,
}

impl Validate for WebhookSubscription {
    fn rules(&self, rules: &mut Rules) {
        let target = self.url.as_deref();
        rules
            .require_text("Url", target)
            .when(target.is_some_and(rules::is_not_blank), |guarded| {
                let target = target.unwrap_or_default();
                guarded.check(
                    "Url",
                    url::Url::parse(target).is_ok_and(|parsed| parsed.scheme() == "https"),
                    "Url must be an absolute https URL",
                    target,
                );
            })
            .check(
                "EventTypes",
                self.event_types.iter().any(|event| !event.is_unspecified()),
                "EventTypes must contain at least one event",
                &self.event_types,
            );
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use crate::domain::validation::validate;

    use super::*;

    fn address() -> Address {
        Address {
            street_address1: Some("1600 Main St".to_owned()),
            city: Some("Denver".to_owned()),
            state_code: StateCode::Colorado,
            zip_code: Some("80202".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn recurring_payment_without_account_and_start_date_is_rejected() {
        let payment = RecurringPayment {
            account_id: 0,
            start_date: None,
            ..Default::default()
        };
        let violations = payment.violations();
        assert!(violations.len() >= 2);
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert!(messages.contains(&"AccountId is required"));
        assert!(messages.contains(&"StartDate is required"));
        assert!(validate(&payment).is_err());
    }

    #[test]
    fn recurring_payment_with_account_and_future_start_is_valid() {
        let payment = RecurringPayment {
            account_id: 1,
            start_date: Some(Utc::now() + Duration::seconds(1)),
            ..Default::default()
        };
        assert!(payment.violations().is_empty());
        assert!(validate(&payment).is_ok());
    }

    #[test]
    fn recurring_payment_guarded_rules_apply_only_when_relevant() {
        let start = Utc::now() + Duration::days(2);
        let payment = RecurringPayment {
            account_id: 1,
            start_date: Some(start),
            end_date: Some(start - Duration::days(1)),
            first_payment_amount: Some(Decimal::new(500, 2)),
            execution_frequency_type: ExecutionFrequencyType::SpecificDayOfMonth,
            execution_frequency_parameter: Some(40),
            ..Default::default()
        };
        let fields: Vec<String> = payment.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["EndDate", "FirstPaymentDate", "ExecutionFrequencyParameter"]
        );
    }

    #[test]
    fn recurring_payment_start_date_in_the_past_is_rejected() {
        let payment = RecurringPayment {
            account_id: 1,
            start_date: Some(Utc::now() - Duration::days(3)),
            ..Default::default()
        };
        let violations = payment.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "StartDate must not be in the past");
    }

    #[test]
    fn customer_validates_nested_addresses() {
        let customer = Customer {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email: Some("ada@example.com".to_owned()),
            phone: Some("(303) 623-4000".to_owned()),
            billing_address: Some(Address {
                city: None,
                state_code: StateCode::Unspecified,
                ..address()
            }),
            shipping_address: None,
            ..Default::default()
        };
        let fields: Vec<String> = customer.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["BillingAddress.City", "BillingAddress.StateCode"]);
    }

    #[test]
    fn customer_skips_shipping_address_when_same_as_billing() {
        let customer = Customer {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            billing_address: Some(address()),
            shipping_address: Some(Address::default()),
            shipping_same_as_billing: true,
            ..Default::default()
        };
        assert!(validate(&customer).is_ok());

        let customer = Customer {
            shipping_same_as_billing: false,
            ..customer
        };
        assert_eq!(customer.violations().len(), 4);
    }

    #[test]
    fn customer_rejects_bad_contact_details() {
        let customer = Customer {
            first_name: Some("Ada".to_owned()),
            last_name: Some(" ".to_owned()),
            email: Some("ada-at-example".to_owned()),
            phone: Some("12".to_owned()),
            ..Default::default()
        };
        let fields: Vec<String> = customer.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["LastName", "Email", "Phone"]);
    }

    #[test]
    fn recurring_payment_serializes_wire_names_and_values() {
        let payment = RecurringPayment {
            account_id: 12,
            payment_amount: Decimal::new(2599, 2),
            start_date: Some(Utc.with_ymd_and_hms(2030, 1, 5, 0, 0, 0).unwrap()),
            execution_frequency_type: ExecutionFrequencyType::FirstOfMonth,
            ..Default::default()
        };
        let value = serde_json::to_value(&payment).unwrap();
        assert_eq!(value["AccountId"], json!(12));
        assert_eq!(value["PaymentAmount"], json!(25.99));
        assert_eq!(value["StartDate"], json!("2030-01-05T00:00:00Z"));
        assert_eq!(value["ExecutionFrequencyType"], json!("FirstofMonth"));
        assert_eq!(value["ScheduleStatus"], json!(null));
    }

    #[test]
    fn payment_decodes_with_unknown_status_and_odd_dates() {
        let json = r#"
        {
          "Id": 5,
          "AccountId": 9,
          "Amount": 10.5,
          "Status": "SomethingNew",
          "PaymentType": "ACH",
          "PaymentDate": "not-a-date",
          "Description": null
        }
        "#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.id, 5);
        assert_eq!(payment.amount, Decimal::new(105, 1));
        assert_eq!(payment.status, PaymentStatus::Unspecified);
        assert_eq!(payment.payment_type, PaymentType::Ach);
        assert_eq!(payment.payment_date, None);
        assert_eq!(payment.description, None);
    }

    #[test]
    fn webhook_subscription_round_trips_event_list() {
        let json = r#"{ "Id": 3, "Url": "https://hooks.example.com/ps", "EventTypes": ["payment_failed", "bogus", "customer_created"], "IsActive": true }"#;
        let subscription: WebhookSubscription = serde_json::from_str(json).unwrap();
        assert_eq!(
            subscription.event_types,
            vec![
                WebhookEventType::PaymentFailed,
                WebhookEventType::Unspecified,
                WebhookEventType::CustomerCreated,
            ]
        );
        assert!(validate(&subscription).is_ok());

        let encoded = serde_json::to_value(&subscription).unwrap();
        assert_eq!(
            encoded["EventTypes"],
            json!(["payment_failed", "customer_created"])
        );
    }

    #[test]
    fn webhook_subscription_requires_https_url_and_events() {
        let subscription = WebhookSubscription {
            url: Some("http://hooks.example.com".to_owned()),
            event_types: vec![WebhookEventType::Unspecified],
            ..Default::default()
        };
        let fields: Vec<String> = subscription.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["Url", "EventTypes"]);
    }
}
