//! Domain layer: API models, vocabulary, validation and response shapes (no I/O).

mod model;
mod request;
mod response;
mod validation;
mod vocabulary;

pub use model::{Address, Customer, Payment, RecurringPayment, WebhookSubscription};
pub use request::PageQuery;
pub use response::{
    EndpointError, ErrorMessage, Meta, PagedResult, PagingDetails, ResponseEnvelope,
};
pub use validation::{Rules, Validate, ValidationFailure, Violation, rules, validate};
pub use vocabulary::{
    ExecutionFrequencyType, PaymentStatus, PaymentType, ScheduleStatus, SortDirection, StateCode,
    WebhookEventType,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_models_with_unknown_vocabulary() {
        let json = r#"
        {
          "Meta": { "Errors": null, "HttpStatusCode": 200, "PagingDetails": null },
          "Response": {
            "Id": 11,
            "AccountId": 3,
            "PaymentAmount": 19.99,
            "StartDate": "2031-02-01",
            "ExecutionFrequencyType": "EveryOtherTuesday",
            "ScheduleStatus": "Active"
          }
        }
        "#;
        let envelope: ResponseEnvelope<RecurringPayment> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.meta.http_status_code, 200);
        let payment = envelope.into_response();
        assert_eq!(payment.id, 11);
        assert_eq!(
            payment.execution_frequency_type,
            ExecutionFrequencyType::Unspecified
        );
        assert_eq!(payment.schedule_status, ScheduleStatus::Active);
        assert_eq!(
            payment.start_date.map(|at| at.to_rfc3339()),
            Some("2031-02-01T00:00:00+00:00".to_owned())
        );
    }

    #[test]
    fn validate_reports_every_violation_of_a_customer() {
        let failure = validate(&Customer::default()).unwrap_err();
        let fields: Vec<&str> = failure
            .violations()
            .iter()
            .map(|violation| violation.field.as_str())
            .collect();
        assert_eq!(fields, vec!["FirstName", "LastName"]);
    }
}
