//! Domain entities representing core business objects.

pub mod otp_record;
pub mod user;

// Re-export commonly used types
pub use otp_record::{is_well_formed_code, OtpRecord, CODE_LENGTH};
pub use user::User;
