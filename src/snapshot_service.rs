//! The snapshot endpoint (C6 transport): a request-agnostic TCP listener that answers every
//! connection with the current marking as JSON.
//!
//! Grounded in `original_source/status_server.c`'s `task_status_server` /
//! `build_status_payload`: accept, read up to 128 bytes of request and discard it, then write
//! a minimal `HTTP/1.1 200 OK` response with `Content-Type: application/json`,
//! `Connection: close`, and `Access-Control-Allow-Origin: *`. Wire-format details beyond
//! "return the current marking as JSON" are out of scope (spec.md §1).

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::kernel::PetriNetKernel;

const REQUEST_READ_CAP: usize = 128;

/// Binds `port` on all interfaces and serves snapshots until the process exits. Never
/// returns on success; a bind failure is the only fatal path (spec.md §7:
/// `SnapshotIOFailure` for everything after that is transient and logged).
pub fn serve(kernel: Arc<PetriNetKernel>, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    info!(port, "snapshot endpoint listening");

    for incoming in listener.incoming() {
        match incoming {
            Ok(stream) => {
                let kernel = Arc::clone(&kernel);
                std::thread::spawn(move || {
                    if let Err(err) = handle_connection(stream, &kernel) {
                        warn!(error = %err, "snapshot connection failed");
                    }
                });
            }
            Err(err) => {
                // Transient per spec.md §7: log and keep serving, never bring down the net.
                warn!(error = %err, "failed to accept snapshot connection");
            }
        }
    }
    Ok(())
}

fn handle_connection(mut stream: TcpStream, kernel: &PetriNetKernel) -> std::io::Result<()> {
    let mut discard = [0u8; REQUEST_READ_CAP];
    // Best-effort: the endpoint does not parse the request, so a read failure or a client
    // that sends nothing is not an error condition either way.
    let _ = stream.read(&mut discard);

    let body = serde_json::to_string(&kernel.snapshot()).unwrap_or_else(|err| {
        error!(error = %err, "failed to serialize snapshot, serving empty body");
        "{\"places\":[]}".to_string()
    });

    let response = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json\r\n\
         Connection: close\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Content-Length: {}\r\n\
         \r\n\
         {}",
        body.len(),
        body
    );

    stream.write_all(response.as_bytes())?;
    stream.shutdown(std::net::Shutdown::Both).ok();
    Ok(())
}
