//! # Mathink Client
//!
//! Talks to the two remote services behind the app:
//!
//! - **recognition** (`POST {base}/predict`): multipart image upload, returns
//!   the recognized equation.
//! - **solver** (`POST {base}/solve`): form-encoded equation and query,
//!   returns step-by-step text that [`parse_solution`] turns into a
//!   [`Solution`].
//!
//! [`CapturePipeline`] chains drawing export, recognition and solving.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod pipeline;
pub mod solution;
pub mod state;

pub use client::{ClientConfig, MathApiClient, Recognition, DEFAULT_QUERY};
pub use error::{ClientError, ClientResult};
pub use pipeline::{CapturePipeline, DrawingSolution};
pub use solution::{parse_solution, Solution};
pub use state::RequestState;
