pub mod xtrf;

pub use xtrf::{parse_export, to_item_drafts, XtrfJob};
