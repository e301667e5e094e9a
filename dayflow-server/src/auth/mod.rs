//! Authentication and authorization
//!
//! - [`JwtService`] - token issue and validation
//! - [`CurrentUser`] - authenticated caller
//! - [`require_auth`] - authentication middleware
//! - [`permissions::authorize`] - the access policy

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};
pub use permissions::{Action, Decision, Ownership, Resource, authorize};
