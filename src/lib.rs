//! Echoverse: text-to-audiobook generation and playback.
//!
//! Submits text to ElevenLabs, owns the resulting audio, and keeps a
//! playback transport in sync with an injected media element.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use echoverse::prelude::*;
//!
//! # async fn example(media: Box<dyn MediaElement>) -> echoverse::error::Result<()> {
//! let config = EchoverseConfig::from_env();
//! let client = ElevenLabsClient::from_config(&config);
//! let controller = GenerationController::new(Arc::new(client), PlaybackController::new(media));
//!
//! let credential = EchoverseConfig::credential_from_env().unwrap_or_default();
//! let request = GenerationRequest::new("Hello world", config.default_voice.clone(), credential);
//! controller.generate(request).await?;
//! controller.playback().play()?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod generation;
pub mod playback;
pub mod prelude;
pub mod provider;
pub mod text;

#[cfg(feature = "cli")]
pub mod cli;
