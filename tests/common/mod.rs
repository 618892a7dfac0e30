//! Shared fixture for integration tests: a temp directory plus a manager
//! with its root already mounted.

use seed_core::{CommandId, Config, Manager, Payload};
use tempfile::TempDir;

#[allow(dead_code)]
pub struct Fixture {
    pub dir: TempDir,
    pub manager: Manager,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let mut manager = Manager::new(Config::default()).expect("construct manager");
        manager
            .exec(CommandId::OpenRoot, Payload::OpenRoot { path: dir.path().to_str().unwrap().to_string() })
            .expect("mount root");
        Fixture { dir, manager }
    }

    pub fn root_path(&self) -> &std::path::Path {
        self.dir.path()
    }
}
