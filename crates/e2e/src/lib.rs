// <crate>/tests signals to Cargo that files inside of it are integration
// tests. Integration tests are compiled into separate binaries which is
// slow. To avoid this we create one integration test there and include all
// scenario modules in it; the shared harness lives here in the library.

pub mod nodes;
pub mod setup;
