//! Transport layer: wire-format details (enum tables, dates, JSON envelopes).

mod error_body;
mod json;
mod lookup;
pub mod wire_date;
pub mod wire_enum;

pub use error_body::decode_error_body;
pub use json::{encode_body, null_as_default};
pub use lookup::{BiLookup, LookupError};
pub use wire_enum::WireEnum;
