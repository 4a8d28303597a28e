#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not read store {path}: {reason}")]
    StoreUnreadable { path: String, reason: String },

    #[error("Store {path} is not a record collection: {reason}")]
    StoreMalformed { path: String, reason: String },
}

impl Error {
    /// Message safe to hand to HTTP clients
    pub fn public_message(&self) -> &'static str {
        match self {
            Error::StoreUnreadable { .. } => "Internal Server Error: Could not read data file.",
            Error::StoreMalformed { .. } => "Internal Server Error: Malformed JSON in data file.",
        }
    }
}
