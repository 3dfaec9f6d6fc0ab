use std::fmt;

/// Fixed text every inference failure displays, whatever the cause
pub const INFERENCE_FAILURE_MESSAGE: &str
  = "Failed to get response from Kindroid AI";

/// Stable public classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind
{   /// Caller passed invalid input, do not retry as-is
    Validation
  , /// Client was built from missing or malformed settings
    Configuration
  , /// The endpoint could not produce a reply
    Inference
}

/// Underlying reason an inference call failed.
/// Kept for operators and logs, never part of the public message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause
{   /// Transport error (connect, TLS, body read)
    Http(String)
  , /// Transport gave up waiting
    Timeout
  , /// Endpoint answered with a non-success status other than 429
    Status
    {   status: u16
      , body: String
    }
  , /// Success status but the body had no usable reply
    Parse(String)
}

impl fmt::Display for FailureCause
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   FailureCause::Http(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , FailureCause::Timeout => {
              write!(f, "Request timed out")
            }
          , FailureCause::Status { status, body } => {
              write!(f, "API error {}: {}", status, body)
            }
          , FailureCause::Parse(msg) => {
              write!(f, "Parse error: {}", msg)
            }
        }
    }
}

impl std::error::Error for FailureCause {}

impl From<reqwest::Error> for FailureCause
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   FailureCause::Timeout
        } else if e.is_decode()
        {   FailureCause::Parse(e.to_string())
        } else
        {   FailureCause::Http(e.to_string())
        }
    }
}

/// Error type for Kindroid operations.
/// Implements Clone so results can be fanned out to several awaiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Conversation passed to invoke had no messages
    EmptyConversation
  , /// Invalid or missing configuration
    InvalidConfiguration(String)
  , /// Any non rate-limit failure talking to the endpoint
    InferenceFailure(FailureCause)
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::EmptyConversation => ErrorKind::Validation
          , Error::InvalidConfiguration(_) => ErrorKind::Configuration
          , Error::InferenceFailure(_) => ErrorKind::Inference
        }
    }

    /// Cause of an inference failure, if this is one
    pub fn cause(&self) -> Option<&FailureCause>
    {   match self
        {   Error::InferenceFailure(cause) => Some(cause)
          , _ => None
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::EmptyConversation => {
              write!(f, "Conversation array cannot be empty")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::InferenceFailure(_) => {
              write!(f, "{}", INFERENCE_FAILURE_MESSAGE)
            }
        }
    }
}

impl std::error::Error for Error
{   fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {   match self
        {   Error::InferenceFailure(cause) => Some(cause)
          , _ => None
        }
    }
}

impl From<FailureCause> for Error
{   fn from(cause: FailureCause) -> Self
    {   Error::InferenceFailure(cause)
    }
}
