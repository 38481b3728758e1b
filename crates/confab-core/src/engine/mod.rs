//! Intent classification and response selection.

pub mod classifier;
pub mod generate;
pub mod responder;

pub use classifier::IntentClassifier;
pub use generate::{GenerateCapability, Generator, NoGenerator};
pub use responder::ResponseEngine;
