use pulse_core::{Command, Message};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Read line commands from `reader` and forward them onto the event bus.
///
/// The task ends when the input closes or the bus is dropped.  On EOF a
/// `Shutdown` is sent only when `exit_on_eof` is set, so a closed stdin
/// (e.g. running under a service manager) keeps the dashboard streaming.
pub fn spawn_commands<Rd>(reader: Rd, tx: mpsc::Sender<Message>, exit_on_eof: bool) -> JoinHandle<()>
where
    Rd: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let command = Command::parse(&line);
                    if let Command::Unknown(raw) = &command {
                        warn!("Unknown command '{raw}'");
                        continue;
                    }
                    debug!(?command, "command received");
                    if let Some(msg) = command.into_message() {
                        if tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => {
                    info!("Command input closed");
                    if exit_on_eof {
                        let _ = tx.send(Message::Shutdown).await;
                    }
                    break;
                }
                Err(e) => {
                    warn!("Command input failed: {e}");
                    break;
                }
            }
        }
    })
}
