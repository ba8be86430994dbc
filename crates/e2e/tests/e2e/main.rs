// One integration-test binary for all scenarios; separate binaries per file
// would recompile the whole harness for each of them.
//
// All tests are `#[ignore]`d because they need a local development chain on
// 127.0.0.1:8545 and a directory of compiled contract artifacts (see
// `e2e::setup::artifacts`). Run them with `cargo test -p e2e -- --ignored`.

mod creatorship;
mod fees;
mod registry;
mod stages;
