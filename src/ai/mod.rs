pub mod gemini;
pub mod keyring;
pub mod parse;

use std::future::Future;

use thiserror::Error;

/// Shortest transcript, after trimming, worth sending to the model.
pub const MIN_TRANSCRIPT_LEN: usize = 10;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No text in API response")]
    EmptyResponse,
}

/// Why a transcript was turned away before any model call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("Invalid transcript provided")]
    Missing,

    #[error("Transcript is too short to generate meaningful action items")]
    TooShort,
}

/// Check a transcript the way every caller must before extraction.
pub fn validate_transcript(transcript: &str) -> Result<&str, TranscriptError> {
    if transcript.is_empty() {
        return Err(TranscriptError::Missing);
    }
    if transcript.trim().chars().count() < MIN_TRANSCRIPT_LEN {
        return Err(TranscriptError::TooShort);
    }
    Ok(transcript)
}

/// Something that turns a transcript into action item strings.
///
/// `instructions` is the prompt text placed ahead of the transcript, read
/// fresh by the caller for every submission. One call per submission:
/// implementations make a single attempt and do not retry.
pub trait Extract: Send + Sync + 'static {
    fn extract(
        &self,
        instructions: &str,
        transcript: &str,
    ) -> impl Future<Output = Result<Vec<String>, ExtractError>> + Send;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert_eq!(validate_transcript(""), Err(TranscriptError::Missing));
        assert_eq!(validate_transcript("   \n "), Err(TranscriptError::TooShort));
        assert_eq!(validate_transcript("  too short  "), Err(TranscriptError::TooShort));
        assert_eq!(validate_transcript("123456789"), Err(TranscriptError::TooShort));
        assert!(validate_transcript("1234567890").is_ok());
    }
}
