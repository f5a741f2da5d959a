//! Domain entities, use-cases, and ports.
//!
//! Purpose: keep the persistence/entity core transport-agnostic. Inbound
//! adapters call the driving ports, outbound adapters implement the driven
//! ports, and nothing in here knows about HTTP or file paths.

pub mod error;
pub mod notice;
pub mod portion;
pub mod ports;
pub mod service;

pub use self::error::{Error, ErrorCode};
pub use self::notice::{BillNotice, bill_summary, combined_notice, current_period, portion_notice};
pub use self::portion::{
    AttachmentKind, Bill, Document, DocumentValidationError, Portion, normalize_month_key,
    parse_members,
};
pub use self::service::{ALLOWED_EXTENSIONS, PortionService};

/// Convenient result alias for use-case and handler signatures.
pub type ApiResult<T> = Result<T, Error>;
