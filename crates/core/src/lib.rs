//! Ekko Core Library
//!
//! This crate provides the interactive prompt engine behind create-ekko-app:
//! it reads raw terminal input, turns it into key events, applies them to the
//! active prompt and redraws the prompt in place.
//!
//! # Key Features
//!
//! - **Key Decoding**: Raw bytes to structured key events (CSI, SS3, meta, ctrl, UTF-8)
//! - **Prompt Kinds**: Text input, yes/no confirmation, single select and checkbox lists
//! - **In-place Rendering**: Redraws erase exactly the rows the last frame used
//! - **Injected Terminal**: A real terminal or scripted input, chosen once at startup
//! - **Error Handling**: Cancellation is told apart from real failures
//!
//! # Examples
//!
//! Asking a couple of questions against scripted input:
//!
//! ```
//! use ekko_core::prompt::{Choice, Confirm, PromptEngine, Select};
//! use ekko_core::terminal::ScriptedTerminal;
//! use ekko_core::theme::Theme;
//!
//! let terminal = ScriptedTerminal::new(80).with_keystrokes(["\x1b[B", "\r", "y\r"]);
//! let mut engine = PromptEngine::new(terminal, Theme::plain());
//!
//! let framework = engine.prompt(Select::new(
//!     "Choose your framework",
//!     vec![
//!         Choice::new("next", "Next.js"),
//!         Choice::new("tanstack-start", "TanStack Start"),
//!     ],
//! ))?;
//! let proceed = engine.prompt(Confirm::new("Proceed?"))?;
//!
//! assert_eq!(framework, "tanstack-start");
//! assert!(proceed);
//! # Ok::<(), ekko_core::error::Error>(())
//! ```

pub mod decoder;
pub mod error;
pub mod key;
pub mod prompt;
pub mod render;
pub mod terminal;
pub mod theme;
