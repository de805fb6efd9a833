//! Test-only HTTP fixtures.
//!
//! The fetcher uses the blocking `reqwest` client, which must not run inside an
//! async context. [`MockHost`] owns a tokio runtime used only to drive
//! `wiremock` setup, so tests themselves stay synchronous.

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

pub struct MockHost {
    server: MockServer,
    runtime: Runtime,
}

impl MockHost {
    pub fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:4321`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server.uri())
    }
}

/// `mock.mount_on(&host)` reads better than `host.mount(mock)` in builder chains.
pub trait MountOn {
    fn mount_on(self, host: &MockHost);
}

impl MountOn for Mock {
    fn mount_on(self, host: &MockHost) {
        host.mount(self);
    }
}
