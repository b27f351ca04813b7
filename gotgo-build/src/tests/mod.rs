//! Unit tests for the build driver components

mod test_imports;
mod test_paths;
