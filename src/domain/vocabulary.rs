//! Enumerated API vocabulary and the exact wire strings the API uses.

use crate::transport::wire_enum::wire_enum;

wire_enum! {
    /// Sort direction for list endpoints (`direction`).
    pub enum SortDirection {
        Asc => "ASC",
        Desc => "DESC",
    }
}

wire_enum! {
    /// Lifecycle status of a single payment.
    pub enum PaymentStatus {
        Authorized => "Authorized",
        Chargeback => "Chargeback",
        Failed => "Failed",
        Pending => "Pending",
        Posted => "Posted",
        RefundSettled => "RefundSettled",
        Returned => "Returned",
        Reversed => "Reversed",
        ReverseNsf => "ReverseNsf",
        ReversePosted => "ReversePosted",
        Settled => "Settled",
        Voided => "Voided",
    }
}

wire_enum! {
    /// Status of a recurring payment schedule.
    pub enum ScheduleStatus {
        Active => "Active",
        PauseUntil => "PauseUntil",
        Expired => "Expired",
        Suspended => "Suspended",
    }
}

wire_enum! {
    /// How often a recurring schedule executes.
    pub enum ExecutionFrequencyType {
        Daily => "Daily",
        Weekly => "Weekly",
        BiWeekly => "BiWeekly",
        FirstOfMonth => "FirstofMonth",
        SpecificDayOfMonth => "SpecificDayofMonth",
        LastOfMonth => "LastofMonth",
        Quarterly => "Quarterly",
        SemiAnnually => "SemiAnnually",
        Annually => "Annually",
    }
}

wire_enum! {
    pub enum PaymentType {
        CreditCard => "CC",
        Ach => "ACH",
    }
}

wire_enum! {
    /// Event names a webhook subscription can listen to.
    pub enum WebhookEventType {
        PaymentCreated => "payment_created",
        PaymentFailed => "payment_failed",
        PaymentReturned => "payment_returned",
        PaymentSettled => "payment_settled",
        PaymentVoided => "payment_voided",
        PaymentRefunded => "payment_refunded",
        CustomerCreated => "customer_created",
        CustomerUpdated => "customer_updated",
        CustomerDeleted => "customer_deleted",
        RecurringScheduleCreated => "recurring_schedule_created",
        RecurringScheduleUpdated => "recurring_schedule_updated",
        RecurringScheduleDeleted => "recurring_schedule_deleted",
        RecurringScheduleFailed => "recurring_schedule_failed",
    }
}

wire_enum! {
    /// US state and district codes (`StateCode`).
    pub enum StateCode {
        Alabama => "AL",
        Alaska => "AK",
        Arizona => "AZ",
        Arkansas => "AR",
        California => "CA",
        Colorado => "CO",
        Connecticut => "CT",
        Delaware => "DE",
        DistrictOfColumbia => "DC",
        Florida => "FL",
        Georgia => "GA",
        Hawaii => "HI",
        Idaho => "ID",
        Illinois => "IL",
        Indiana => "IN",
        Iowa => "IA",
        Kansas => "KS",
        Kentucky => "KY",
        Louisiana => "LA",
        Maine => "ME",
        Maryland => "MD",
        Massachusetts => "MA",
        Michigan => "MI",
        Minnesota => "MN",
        Mississippi => "MS",
        Missouri => "MO",
        Montana => "MT",
        Nebraska => "NE",
        Nevada => "NV",
        NewHampshire => "NH",
        NewJersey => "NJ",
        NewMexico => "NM",
        NewYork => "NY",
        NorthCarolina => "NC",
        NorthDakota => "ND",
        Ohio => "OH",
        Oklahoma => "OK",
        Oregon => "OR",
        Pennsylvania => "PA",
        RhodeIsland => "RI",
        SouthCarolina => "SC",
        SouthDakota => "SD",
        Tennessee => "TN",
        Texas => "TX",
        Utah => "UT",
        Vermont => "VT",
        Virginia => "VA",
        Washington => "WA",
        WestVirginia => "WV",
        Wisconsin => "WI",
        Wyoming => "WY",
    }
}
