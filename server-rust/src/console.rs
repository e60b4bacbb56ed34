//! Operator prompt on the server's terminal.
use std::future::{pending, Future};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info, warn};

pub const PROMPT: &str = "Type stop to shutdown the server: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// The operator typed `stop`.
    Stop,
    /// Input closed before `stop` was read.
    Closed,
}

/// Prompt until the operator types `stop` or input ends.
pub async fn run_console<R, W>(input: R, mut output: W) -> io::Result<ConsoleExit>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        match lines.next_line().await? {
            Some(command) if command == "stop" => {
                output.write_all(b"Shutting down the server\n").await?;
                output.flush().await?;
                return Ok(ConsoleExit::Stop);
            }
            Some(command) => {
                output
                    .write_all(format!("Invalid command: {command}\n").as_bytes())
                    .await?;
            }
            None => return Ok(ConsoleExit::Closed),
        }
    }
}

/// Resolves once the operator asks to stop, either through the console or
/// through `signal`. A source that ends or fails is dropped from the race
/// and the other one keeps running.
pub async fn wait_for_stop<C, S>(console: C, signal: S)
where
    C: Future<Output = io::Result<ConsoleExit>>,
    S: Future<Output = io::Result<()>>,
{
    let console = async {
        match console.await {
            Ok(ConsoleExit::Stop) => {}
            Ok(ConsoleExit::Closed) => {
                info!("stdin closed, console disabled");
                pending::<()>().await;
            }
            Err(err) => {
                warn!(error = %err, "console failed, use Ctrl-C to stop");
                pending::<()>().await;
            }
        }
    };

    let signal = async {
        if let Err(err) = signal.await {
            error!(error = %err, "failed to listen for Ctrl-C");
            pending::<()>().await;
        }
    };

    tokio::select! {
        () = console => {}
        () = signal => {}
    }
}
