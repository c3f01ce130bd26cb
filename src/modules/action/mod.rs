pub mod composer;
pub mod store;

pub use composer::{Briefing, BriefingComposer};
pub use store::{ArchivedBriefing, BriefingStore, StoreError};
