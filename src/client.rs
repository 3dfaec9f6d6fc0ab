use log::{debug, trace, error};
use reqwest::StatusCode;

use crate::error::{Error, FailureCause};
use crate::request::{
  ConversationMessage, InferenceRequest, InferenceResponse,
  InferenceResult
};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const REQUESTER_HEADER: &str = "X-Kindroid-Requester";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for the Kindroid inference endpoint.
///
/// Holds validated configuration and a pooled HTTP client; cheap to
/// clone and safe to share between tasks. Dropping an `invoke` future
/// aborts its request.
#[derive(Debug, Clone)]
pub struct KindroidClient
{   config: crate::config::KindroidConfig
  , http_client: reqwest::Client
}

impl KindroidClient
{   /// Validate the configuration and build the client
    pub fn new(
      config: crate::config::KindroidConfig
    ) -> Result<Self, Error>
    {   debug!("Creating KindroidClient for {}", config.infer_url);
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout()
        {   debug!("Using request timeout of {:?}", timeout);
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(KindroidClient
        {   config
          , http_client
        })
    }

    /// Build a client from `KINDROID_*` environment variables
    pub fn from_env() -> Result<Self, Error>
    {   Self::new(crate::config::KindroidConfig::from_env()?)
    }

    pub fn config(&self) -> &crate::config::KindroidConfig
    {   &self.config
    }

    /// [`KindroidClient::invoke`] with the content filter off
    pub async fn invoke_unfiltered(
      &self
    , share_code: &str
    , conversation: &[ConversationMessage]
    ) -> Result<InferenceResult, Error>
    {   self.invoke(share_code, conversation, false).await
    }

    /// Send a conversation to the endpoint and map the answer.
    ///
    /// Returns `Ok(RateLimited)` on HTTP 429. Every other failure is
    /// `Error::InferenceFailure`, whose message never carries the
    /// cause; the cause is logged and kept in the error's source.
    pub async fn invoke(
      &self
    , share_code: &str
    , conversation: &[ConversationMessage]
    , enable_filter: bool
    ) -> Result<InferenceResult, Error>
    {   let last = conversation.last()
          .ok_or(Error::EmptyConversation)?;
        let requester = crate::requester::requester_id(&last.username);

        debug!(
          "Invoking Kindroid share code {} with {} messages",
          share_code, conversation.len()
        );

        let request = InferenceRequest
        {   share_code
          , conversation
          , enable_filter
        };

        self.dispatch(&request, &requester)
          .await
          .map_err(|cause| {
            error!("Kindroid inference failed: {}", cause);
            cause
          })
          .map_err(Error::from)
    }

    async fn dispatch(
      &self
    , request: &InferenceRequest<'_>
    , requester: &str
    ) -> Result<InferenceResult, FailureCause>
    {   trace!("Kindroid request: {:?}", request);

        let response = self.http_client
          .post(&self.config.infer_url)
          .header(
            AUTHORIZATION_HEADER,
            format!("Bearer {}", self.config.api_key)
          )
          .header(REQUESTER_HEADER, requester)
          .header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE)
          .json(request)
          .send()
          .await?;

        let status = response.status();
        trace!("Kindroid response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS
        {   debug!("Kindroid rate limited the request");
            return Ok(InferenceResult::RateLimited);
        }

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            return Err(FailureCause::Status
            {   status: status.as_u16()
              , body
            });
        }

        let body = response.bytes().await?;
        let parsed: InferenceResponse
          = serde_json::from_slice(&body).map_err(|e| {
            FailureCause::Parse(e.to_string())
          })?;

        debug!("Kindroid replied with {} bytes", parsed.reply.len());
        Ok(InferenceResult::Success
        {   reply: parsed.reply
        })
    }
}
