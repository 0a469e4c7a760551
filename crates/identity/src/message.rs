use std::fmt;

/// Upper bound on message length, in UTF-8 bytes.
pub const MAX_MESSAGE_LEN: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message must not be empty")]
    Empty,
    #[error("message is {len} bytes, the limit is {max} bytes")]
    TooLong { len: usize, max: usize },
}

/// A validated message: 1..=250 bytes of UTF-8.
///
/// The message is both the signing payload and the key store lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        if text.is_empty() {
            return Err(MessageError::Empty);
        }
        if text.len() > MAX_MESSAGE_LEN {
            return Err(MessageError::TooLong {
                len: text.len(),
                max: MAX_MESSAGE_LEN,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::str::FromStr for Message {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
