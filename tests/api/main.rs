// Router-level integration tests for the TubeFeed backend.
//
// These tests drive the real axum router through `tower::ServiceExt::oneshot`
// with in-memory repository fakes standing in for the Postgres store, so the
// whole request pipeline (routing, validation, scope resolution, assembly,
// rendering, error mapping) is exercised without a database.

mod helpers;
mod test_feeds;
mod test_health;
