//! Backend credentials

mod google;

pub use google::{CredentialsError, GoogleAuth, GoogleCredentials};
