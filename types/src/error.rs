/*!
    Error taxonomy for the streamdec crate ecosystem.
*/

use thiserror::Error;

/**
    Result alias used throughout the ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;

/**
    Errors surfaced by the adapter and its collaborators.

    Parsing stalls (`NeedMoreData`, `NoProgress`) are control flow, not
    errors; they never appear here.
*/
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The codec engine rejected the stream parameters; the session stays
    /// closed.
    #[error("engine refused stream parameters: {0}")]
    EngineOpen(String),

    /// The engine reported a fatal bitstream error mid-stream. The current
    /// chunk's remaining bytes are discarded; the session stays open.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The output format could not be established downstream. The current
    /// unit is dropped; later units retry.
    #[error("output negotiation failed: {0}")]
    Negotiation(String),

    /// The engine produced output the adapter cannot interpret, such as a
    /// negative sample count. The current chunk is aborted.
    #[error("malformed engine output: {0}")]
    MalformedOutput(String),

    /// An internal contract was broken. Programmer error; never swallowed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /**
        Engine rejected open parameters.
    */
    pub fn engine_open(reason: impl Into<String>) -> Self {
        Error::EngineOpen(reason.into())
    }

    /**
        Fatal decode failure.
    */
    pub fn decode(reason: impl Into<String>) -> Self {
        Error::Decode(reason.into())
    }

    /**
        Downstream negotiation failure.
    */
    pub fn negotiation(reason: impl Into<String>) -> Self {
        Error::Negotiation(reason.into())
    }

    /**
        Uninterpretable engine output.
    */
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedOutput(reason.into())
    }

    /**
        Internal contract breach.
    */
    pub fn invariant(reason: impl Into<String>) -> Self {
        Error::InvariantViolation(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let e = Error::engine_open("unsupported dimensions");
        assert_eq!(
            e.to_string(),
            "engine refused stream parameters: unsupported dimensions"
        );

        let e = Error::invariant("pending buffer already present");
        assert_eq!(
            e.to_string(),
            "invariant violated: pending buffer already present"
        );
    }
}
