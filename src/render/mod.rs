//! View Renderer
//!
//! Builds the page content from decoded backend responses:
//!
//! - **Node**: owned element tree with HTML serialization
//! - **Container**: the page shell's render targets, fully replaced on
//!   every render
//! - **Views**: directory (elections), candidate detail, polling location
//!
//! Each view is a plain value derived from a response. Applying it to a
//! [`PageShell`] is deterministic: the same view always yields the same
//! containers.

pub mod candidate;
pub mod container;
pub mod dates;
pub mod directory;
mod error;
pub mod node;
pub mod polling;

pub use candidate::CandidateView;
pub use container::{ids, Container, PageShell};
pub use directory::{render_elections, DirectoryView};
pub use error::{RenderError, RenderResult};
pub use node::{Element, Node};
pub use polling::PollingView;
