
pub use app_builder::create_test_app;
pub use test_state::{build_test_state, TestContext};
