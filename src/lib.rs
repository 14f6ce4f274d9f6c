//! Workspace-level end-to-end tests for Almoner live in `tests/`.
