//! Auth Application Layer - Use Cases

pub mod check_session;
pub mod config;
pub mod issue_code;
pub mod password_reset;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
pub mod verify_account;

pub use check_session::{CheckSessionUseCase, SessionInfoOutput};
pub use issue_code::{CodePurpose, IssueCodeUseCase};
pub use password_reset::{ResetPasswordInput, ResetPasswordUseCase, UpdatePasswordUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_account::VerifyAccountUseCase;
