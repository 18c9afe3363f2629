mod feed_mock;
mod smoke_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - feed_mock: Decoding realistic 25Live feed payloads
// - reconcile_tests: Reconciliation behavior against the in-memory store
