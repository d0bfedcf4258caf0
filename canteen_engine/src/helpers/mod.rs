mod callback_signature;

pub use callback_signature::{calculate_signature, verify_callback_signature, CallbackSignatureError};
