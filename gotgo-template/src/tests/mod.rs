//! Unit tests for the template instantiation engine

mod test_binder;
mod test_rewriter;
mod test_stub;
