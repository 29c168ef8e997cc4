pub mod audio;
pub mod controller;
pub mod error;

pub use audio::{AudioHandle, AudioStore};
pub use controller::{FormInput, RequestState, SynthesisRequestController, MAX_TEXT_CHARS};
pub use error::ApiError;
