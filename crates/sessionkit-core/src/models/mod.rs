//! Data models shared by the store, the API client and the auth flow.
//!
//! - `User`, `Role`, `UserPatch`: the signed-in account
//! - `ApiResponse`, `PaginatedResponse`, `ErrorResponse`: backend envelopes
//! - `AuthPayload`: the `data` of a successful login or registration

pub mod response;
pub mod user;

pub use response::{ApiResponse, AuthPayload, ErrorResponse, PaginatedResponse, Pagination};
pub use user::{Role, User, UserPatch};
