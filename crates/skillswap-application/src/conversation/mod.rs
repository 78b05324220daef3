//! Client-side conversation state.
//!
//! # Module Structure
//!
//! - `normalizer`: annotates server chat records with the viewer's counterpart
//! - `selection`: default-selection policy for the active conversation
//! - `thread`: messages of the active conversation
//! - `pending`: registry of in-flight sends
//! - `state`: the reducer tying the pieces together

mod normalizer;
mod pending;
mod selection;
mod state;
mod thread;


pub use normalizer::normalize_conversations;
pub use pending::PendingSends;
pub use selection::default_selection;
pub use state::{ConversationSnapshot, ConversationState, PendingMessage, Selection, StartConversation};
pub use thread::MessageThread;
