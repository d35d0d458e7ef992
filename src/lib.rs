pub mod config;
pub mod digest;
pub mod email;
pub mod history;
pub mod llm;
pub mod pipeline;
pub mod sources;
pub mod types;
pub mod urls;

pub use config::{load_sources, require_env, SourcesConfig};
pub use digest::{build_digest, DigestOptions};
pub use email::EmailSender;
pub use history::{load_sent_urls, save_digest_markdown, save_sent_urls};
pub use llm::{AnthropicLlm, Llm, MockLlm};
pub use pipeline::{run_pipeline, PipelineConfig};
pub use sources::{build_client, fetch_all_items};
pub use types::*;
pub use urls::normalize_url;
