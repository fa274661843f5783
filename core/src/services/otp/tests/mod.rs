pub(crate) mod mocks;
mod pruner_tests;
mod service_tests;
