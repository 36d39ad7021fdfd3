// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probes for the stub analytical API.
// Purpose: Ensure the stub is accepting connections without arbitrary sleeps.
// Dependencies: tokio
// ============================================================================

use std::net::SocketAddr;
use std::time::Duration;
use std::time::Instant;

use tokio::net::TcpStream;
use tokio::time::sleep;

/// Polls a TCP connect until the server accepts or the timeout expires.
pub async fn wait_for_api_ready(addr: SocketAddr, timeout: Duration) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "stub readiness timeout after {attempts} attempts: {err}"
                    ));
                }
                sleep(Duration::from_millis(50)).await;
            }
        }
    }
}
