//! Application Layer
//!
//! Use cases and application services.

pub mod access_token;
pub mod check_token;
pub mod config;
pub mod greet;
pub mod log_in;
pub mod log_out;
pub mod sign_up;

// Re-exports
pub use access_token::{AccessTokenClaims, IssuedToken, TokenService};
pub use check_token::{AuthenticatedUser, CheckTokenUseCase};
pub use config::AuthConfig;
pub use greet::GreetUseCase;
pub use log_in::{LogInInput, LogInOutput, LogInUseCase};
pub use log_out::LogOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
