//! Line-oriented console over an [`AgentSession`].
//!
//! An interrupt while a request is in flight cancels it; an interrupt at the
//! prompt ends the loop, as does end of input.

use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::session::{AgentSession, SubmitOutcome};
use super::transport::AgentTransport;

pub async fn run_console<T, R, W, I, F>(
    session: Arc<AgentSession<T>>,
    input: R,
    mut output: W,
    mut interrupt: I,
) -> io::Result<()>
where
    T: AgentTransport + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    I: FnMut() -> F,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
            _ = interrupt() => {
                tracing::debug!("interrupted at prompt");
                break;
            }
        };

        let mut request = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.submit(&line).await }
        });

        // A finished request wins over a simultaneous interrupt
        let outcome = tokio::select! {
            biased;
            outcome = &mut request => outcome,
            _ = interrupt() => {
                session.cancel();
                (&mut request).await
            }
        }
        .map_err(io::Error::other)?;

        if let SubmitOutcome::Answered(turn) = outcome {
            output
                .write_all(format!("assistant> {}\n", turn.content).as_bytes())
                .await?;
        }
        for notice in session.take_notices() {
            output
                .write_all(format!("[{}]\n", notice.text()).as_bytes())
                .await?;
        }
        output.flush().await?;
    }

    Ok(())
}
