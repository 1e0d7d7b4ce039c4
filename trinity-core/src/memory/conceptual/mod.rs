mod entry;
mod record;

pub use entry::ConceptualEntry;
pub use record::{
    Conversation, Hybrid, Idea, IdeaStatus, IdeaVersion, Message, Note, Plan, Thought,
    ThoughtCategory,
};
pub use record::ConceptualRecord;
