//! # Keisan - Calculus Solver Client Core
//!
//! **Keisan** is the client-side half of a multivariable calculus tool. It knows which
//! inputs every operation needs, keeps those inputs alive across restarts, turns them
//! into the exact request the remote solver expects, and renders whatever comes back.
//! The solver itself does all the mathematics.
//!
//! ## Core Workflow
//!
//! 1.  **Pick an operation**: The `Registry` declares each operation's fields, payload
//!     shape and rendering hints.
//! 2.  **Fill the form**: The `FormEngine` materializes those fields, runs each one
//!     through its placeholder/edited lifecycle and persists values in a `KeyValueStore`.
//! 3.  **Build the request**: The `RequestBuilder` normalizes field text (variable lists,
//!     interval bounds, numeric vectors, LaTeX input) into a `RequestPayload`.
//! 4.  **Solve and render**: A `SolverClient` performs the round trip and the
//!     `ResultRenderer` produces a `DisplayModel` with display and clipboard text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keisan::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(Registry::standard());
//!     let client = HttpSolverClient::new(DEFAULT_ENDPOINT, Duration::from_secs(30))?;
//!     let mut session = Session::new(registry, MemoryStore::new(), client);
//!
//!     session.select("gradient")?;
//!     session.form_mut().fill("expression", "x^2 y + z")?;
//!     session.form_mut().fill("variables", "x y z")?;
//!
//!     let display = session.submit()?;
//!     println!("{}", display.text());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod normalize;
pub mod prelude;
pub mod registry;
pub mod render;
pub mod request;
pub mod session;
pub mod solver;
pub mod store;
