//! livematch locates reference images ("templates") inside a stream of
//! screen or window captures, to drive automated interaction with a GUI.
//!
//! The pipeline has five parts:
//! - `FrameRing`: a bounded history of captured frames that consumers pull
//!   from (it implements `FrameSource`);
//! - `VariantCache`: per-template cache of preprocessed variants
//!   (grayscale or colour, optional blur, optional edges);
//! - `find_best`: scale-space correlation search for the single best match;
//! - `find_all`: several matches from one surface with non-maximum
//!   suppression;
//! - `LiveMatcher`: single-shot searches anchored near the last hit, and
//!   polling waits that require consecutive stable hits.
//!
//! Scoring is CPU-only. The `rayon` feature scores surface rows in
//! parallel, `simd` vectorizes the dot product with `wide`, `image-io`
//! loads PNG/JPEG files, and `tracing` emits spans and events.
//!
//! ```no_run
//! use livematch::{
//!     Frame, FrameRing, LiveMatcher, MatchOptions, PixelBuffer, PixelFormat, Template,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> livematch::LiveMatchResult<()> {
//! let ring = Arc::new(FrameRing::new(30));
//! let screen = PixelBuffer::from_packed(vec![0; 64 * 48 * 4], 64, 48, PixelFormat::Bgra8)?;
//! ring.push(Frame::new(screen, 1));
//!
//! let icon = PixelBuffer::from_packed(vec![0; 8 * 8 * 4], 8, 8, PixelFormat::Bgra8)?;
//! let template = Template::new("icon", icon);
//! let matcher = LiveMatcher::new(Arc::clone(&ring));
//! let found = matcher.find_best_match(&template, &MatchOptions::default())?;
//! println!("{found:?}");
//! # Ok(())
//! # }
//! ```

mod candidate;
pub mod frame;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod preprocess;
pub mod search;
pub mod stabilize;
pub mod template;
mod trace;
pub mod util;

pub use frame::{Frame, FrameOrigin, FrameRing, FrameSource};
pub use image::{ImageView, PixelBuffer, PixelFormat, Plane, Point, Rect};
pub use preprocess::PreprocessKey;
pub use search::{find_all, find_best, MatchOptions, MatchResult, Metric};
pub use stabilize::{HitMemory, LiveMatcher, SessionState, StabilizerConfig, WaitOptions};
pub use template::{
    MemoryTemplateStore, Template, TemplateId, TemplateLibrary, TemplateStore, VariantCache,
};
pub use util::{LiveMatchError, LiveMatchResult};

#[cfg(feature = "image-io")]
pub use template::DirTemplateStore;

pub use tokio_util::sync::CancellationToken;
