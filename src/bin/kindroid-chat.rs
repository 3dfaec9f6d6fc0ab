use clap::Parser;
use log::{debug, error};
use std::process::ExitCode;
use std::time::Duration;

use kindroid::{ConversationMessage, InferenceResult, KindroidClient, KindroidConfig};

/// Send one message to a Kindroid persona and print the reply
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli
{   /// Share code of the persona to talk to
    #[arg(short, long, env = "KINDROID_SHARE_CODE")]
    share_code: String

  , /// Name the message is sent under
    #[arg(short, long, default_value = "user")]
    username: String

  , /// Enable the endpoint's content filter
    #[arg(long, default_value_t = false)]
    filter: bool

  , /// Inference endpoint URL
    #[arg(long, env = "KINDROID_INFER_URL")]
    infer_url: String

  , /// Bearer credential
    #[arg(long, env = "KINDROID_API_KEY", hide_env_values = true)]
    api_key: String

  , /// Request timeout in seconds
    #[arg(long, env = "KINDROID_TIMEOUT_SECS")]
    timeout_secs: Option<f64>

  , /// Message to send
    message: String
}

#[tokio::main]
async fn main() -> ExitCode
{   env_logger::init();
    let cli = Cli::parse();

    let mut config = KindroidConfig::new(cli.infer_url, cli.api_key);
    if let Some(secs) = cli.timeout_secs
    {   match Duration::try_from_secs_f64(secs)
        {   Ok(timeout) => config = config.with_timeout(timeout)
          , Err(e) => {
              eprintln!("Invalid timeout {}: {}", secs, e);
              return ExitCode::from(1);
            }
        }
    }

    let client = match KindroidClient::new(config)
    {   Ok(client) => client
      , Err(e) => {
          error!("{}", e);
          eprintln!("{}", e);
          return ExitCode::from(1);
        }
    };

    let conversation = vec![
      ConversationMessage::new(cli.username, cli.message)
    ];
    debug!("Sending message as {}", conversation[0].username);

    match client
      .invoke(&cli.share_code, &conversation, cli.filter)
      .await
    {   Ok(InferenceResult::Success { reply }) => {
          println!("{}", reply);
          ExitCode::SUCCESS
        }
      , Ok(InferenceResult::RateLimited) => {
          eprintln!("Rate limited, try again later");
          ExitCode::from(2)
        }
      , Err(e) => {
          eprintln!("{}", e);
          ExitCode::from(1)
        }
    }
}
