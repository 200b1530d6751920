//! # Placard - Styled QR Code Card Generator
//!
//! Placard turns a line-delimited list of payload strings (URLs, Wi-Fi
//! credentials, phone numbers, ...) into a batch of styled, shareable card
//! images. It provides:
//!
//! - **Card composition**: eight built-in templates plus sandboxed custom
//!   script templates, all sharing one render contract
//! - **Drawing primitives**: gradients, shadowed rounded rectangles,
//!   circular logo composition, centered text
//! - **Palette extraction**: representative colors pulled from a logo image
//! - **Batch orchestration**: a background worker with progress reporting
//!
//! ## Quick Start
//!
//! ```no_run
//! use placard::{
//!     color::DEFAULT_PALETTE,
//!     encode,
//!     template::{self, TextSettings},
//! };
//!
//! // Encode one payload at module scale 10 with a 1-module border
//! let bitmap = encode::encode("https://example.com", 10, 1)?;
//!
//! // Compose a card with the Modern Gradient template
//! let card = template::builtin(1)
//!     .unwrap()
//!     .render(&bitmap, "VPN 1", &DEFAULT_PALETTE, None, &TextSettings::default())?;
//!
//! card.save("card.png").ok();
//! # Ok::<(), placard::PlacardError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Render contract, built-in variants, script templates |
//! | [`draw`] | Shared drawing primitives |
//! | [`palette`] | Logo palette extraction |
//! | [`encode`] | Payload classification and QR encoding |
//! | [`job`] | Batch generation orchestrator |
//! | [`store`] | Persisted history/template/preset documents |
//! | [`error`] | Error types |

pub mod color;
pub mod draw;
pub mod encode;
pub mod error;
pub mod job;
pub mod palette;
pub mod store;
pub mod template;

// Re-exports for convenience
pub use error::PlacardError;
pub use job::{GenerationJob, JobEvent, JobSpec, JobState, OutputFormat};
pub use store::Store;
