//! Presentation collaborator interface.

pub mod presenter;

pub use presenter::{NullPresenter, Presenter};
