use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::cluster::{MasterLocator, Node};
use crate::config::AppConfig;
use crate::state::AppState;
use crate::store::MemoryStore;

/// Locator with a fixed answer, for exercising both sides of the forwarder
pub struct FixedLocator {
    is_self: bool,
    master: Option<Node>,
}

impl FixedLocator {
    pub fn master() -> Self {
        Self {
            is_self: true,
            master: Some(Node::new("127.0.0.1", 7070)),
        }
    }

    pub fn follower(master: Option<Node>) -> Self {
        Self {
            is_self: false,
            master,
        }
    }
}

impl MasterLocator for FixedLocator {
    fn is_self(&self) -> bool {
        self.is_self
    }

    fn current(&self) -> Option<Node> {
        self.master.clone()
    }
}

/// State with an empty in-memory store and the credential `admin`/`secret`
pub fn state(locator: FixedLocator) -> AppState {
    let mut config = AppConfig::from_env();
    config.security.username = "admin".to_string();
    config.security.password = "secret".to_string();
    config.security.token_issuer = "admin-gateway".to_string();

    AppState::new(&config, Arc::new(MemoryStore::new()), Arc::new(locator))
}

/// Formatted tracing output collected in memory.
///
/// `install` sets it as the thread's default subscriber; with the
/// current-thread runtime of `#[tokio::test]` that covers the whole test.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines of the access log only
    pub fn access_lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains("access_log") && line.contains(" access "))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
