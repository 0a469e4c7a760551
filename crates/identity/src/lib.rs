pub mod encoding;
pub mod engine;
pub mod error;
pub mod message;
pub mod naming;
pub mod signing;
pub mod store;

pub use encoding::OutputRecord;
pub use engine::{Identity, IdentityEngine, KeySource};
pub use error::IdentityError;
pub use message::{MAX_MESSAGE_LEN, Message, MessageError};
pub use signing::KeyPair;
pub use store::KeyStore;
