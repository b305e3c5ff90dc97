//! Workspace architecture enforcement. All checks live in `tests/`.
