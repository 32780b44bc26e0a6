//! Example: relay one SAMP message through this hop
//!
//! Reads a SAMP message from stdin, logs it, and writes the derived response
//! (with this hop appended to the trace path) to stdout.
//!
//! ```text
//! printf 'SAMP/1.0 EVENT /make/lunch\nTrace: api-gateway\n\nburger' \
//!     | RUST_LOG=debug cargo run --example relay -- kitchen
//! ```

use samp::{CorrelationId, CORRELATION_ID_HEADER};
use tokio::io::{self, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the SAMP bytes
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let hop = std::env::args().nth(1).unwrap_or_else(|| "relay".to_string());

    let message = match samp::parse_async(BufReader::new(io::stdin())).await {
        Ok(message) => message,
        Err(err) => {
            tracing::error!(error = %err, "Could not parse incoming message");
            return Err(err.into());
        }
    };
    tracing::info!(
        action = %message.action(),
        trace = ?message.trace_paths(),
        "Relaying message"
    );

    let mut reply = samp::response_with_trace_path(&message, &hop);
    if message.header(CORRELATION_ID_HEADER).is_none() {
        // Start a conversation so downstream hops can correlate
        reply = reply.with_correlation_id(CorrelationId::new());
    }
    if let Some(body) = message.body() {
        reply = reply.with_body(body);
    }

    let mut stdout = io::stdout();
    samp::write_message_async(&mut stdout, &reply.build()).await?;
    stdout.flush().await?;
    Ok(())
}
