//! Button palette generation by finite-difference gradient descent.
//!
//! A single base color is turned into button text, hover background, hover
//! text, and page background colors. Each text color minimizes a contrast
//! and style loss; the hover background comes from a [`hover::HoverStrategy`].

pub mod apca;
pub mod cli;
pub mod color;
pub mod config;
pub mod gradient;
pub mod hover;
pub mod logging;
pub mod loss;
pub mod optimizer;
pub mod pipeline;
pub mod report;
pub mod validation;
