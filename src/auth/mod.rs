//! Authentication Module
//!
//! Password and federated sign-in, bearer tokens and password reset.
//!
//! ## Core Concepts
//! - **Tokens**: HS256 JWTs carrying the user id in `sub`, valid for 24 hours.
//!   Protected handlers take an `AuthUser` extractor.
//! - **Passwords**: stored as Argon2 PHC strings, never in clear.
//! - **Federated sign-in**: ID tokens are checked by a `FederatedVerifier`;
//!   the production verifier asks Google's token-info endpoint.
//! - **Reset**: a random token valid for one hour, delivered through a `Mailer`.

pub mod extractor;
pub mod federated;
pub mod handlers;
pub mod mailer;
pub mod password;
pub mod service;
pub mod token;
pub mod types;
