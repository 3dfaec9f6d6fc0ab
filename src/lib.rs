pub mod error;
pub mod config;
pub mod request;
pub mod requester;
pub mod client;

/*

kindroid is a small async-only client for the Kindroid AI inference
endpoint: one call sends a share code plus a conversation transcript
and comes back with the persona's reply, or a rate-limit signal the
caller can back off on.

kindroid/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and main documentation
│   ├── error.rs        # Error kinds and failure causes
│   ├── config.rs       # Endpoint, credential and timeout settings
│   ├── request.rs      # Wire payloads and the call result
│   ├── requester.rs    # X-Kindroid-Requester id derivation
│   ├── client.rs       # KindroidClient::invoke
│   └── bin/
│       └── kindroid-chat.rs  # One-shot command line client
└── tests/              # Mock-server integration tests

*/

pub use client::KindroidClient;
pub use config::KindroidConfig;
pub use error::{Error, ErrorKind, FailureCause};
pub use request::{ConversationMessage, InferenceResult};
pub use requester::requester_id;
