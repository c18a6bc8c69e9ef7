/// API route handlers
///
/// - `health`: Health check endpoint
/// - `items`: Next unlabeled item for a user
/// - `labels`: Label submission
/// - `export`: CSV and JSONL downloads
/// - `debug`: Store counts and demo-text seeding
/// - `ui`: Browser labeling page

pub mod debug;
pub mod export;
pub mod health;
pub mod items;
pub mod labels;
pub mod ui;
