//! Integration test modules

mod document_files;
mod drag_session;
