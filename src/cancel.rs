// Cooperative cancellation for wordfuzz

use tokio_util::sync::CancellationToken;

/// Write-once stop flag shared by the dispatcher and its workers.
///
/// Workers poll it between jobs; a request already in flight always
/// completes and is counted.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: CancellationToken,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent; there is no way to clear it again.
    pub fn request_cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}
