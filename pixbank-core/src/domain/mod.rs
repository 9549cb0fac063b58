//! Core domain entities
//!
//! Pass-through DTOs mirroring the backend payloads. No I/O here.

mod account;
mod session;
mod transfer;
mod user;
pub mod result;

pub use account::BankAccount;
pub(crate) use account::BankAccountsResponse;
pub use session::{AuthResponse, LoginCredentials, Session, SignUpCredentials};
pub use transfer::{
    Direction, Statement, Transfer, TransferFilters, TransferRequest, TransferType,
};
pub(crate) use transfer::StatementResponse;
pub use user::{SessionUser, UserProfile};
pub(crate) use user::UserProfileResponse;
