//! Multi-step player interactions.
//!
//! ## Key Types
//!
//! - `ActionChain`: Ordered, cancellable step machine
//! - `StepValue`: What a step contributes to the chain's results
//! - `Surface`: The buttons and selectable targets a live step offers

pub mod chain;
pub mod surface;

pub use chain::{ActionChain, ChainState, StepControls};
pub use surface::{
    Button, ButtonAction, ButtonView, PickSpec, Requirement, Selection, StepValue, Surface, UiInput,
};
