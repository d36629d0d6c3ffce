use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::message::InboundEvent;

const LINE_BUFFER: usize = 64;

/// Reads newline-delimited JSON events from stdin until EOF.
///
/// The blocking read lives on its own OS thread rather than the runtime's
/// blocking pool, so a shutdown while stdin is still open does not wait on it.
pub async fn start_stdin_source(events: mpsc::Sender<InboundEvent>) -> anyhow::Result<()> {
    info!("Reading events from stdin");
    let lines = spawn_line_reader(std::io::stdin());
    let forwarded = forward_lines(lines, events).await;
    info!("stdin closed after {} events", forwarded);
    Ok(())
}

/// Pumps lines from a blocking reader into a channel on a dedicated thread.
///
/// The thread ends at EOF, on a read error, or once the receiver is dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: std::io::Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    thread::spawn(move || {
        for line in std::io::BufReader::new(reader).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Input read failed: {}", e);
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                debug!("Line consumer gone, stopping reader thread");
                break;
            }
        }
    });

    rx
}

/// Parses each line and forwards valid events. Bad lines are logged and
/// skipped so they never reach the processor.
pub async fn forward_lines(mut lines: mpsc::Receiver<String>, events: mpsc::Sender<InboundEvent>) -> u64 {
    let mut forwarded = 0;

    while let Some(line) = lines.recv().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match InboundEvent::parse(line) {
            Ok(e) => e,
            Err(e) => {
                warn!("Rejected input line: {}", e);
                continue;
            }
        };

        if events.send(event).await.is_err() {
            warn!("Event queue closed, stopping stdin source");
            break;
        }
        forwarded += 1;
    }

    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    use crate::models::alert::AlertKind;
    use crate::models::coordinate::Coordinate;
    use crate::store::Action;

    #[tokio::test]
    async fn test_forwards_valid_lines_and_skips_bad_ones() {
        let input = concat!(
            "{\"lat\": 26.1445, \"lng\": 91.7362}\n",
            "\n",
            "{\"lat\": 200, \"lng\": 0}\n",
            "garbage\n",
            "{\"type\": \"UNKNOWN_ACTION\"}\n",
            "{\"type\": \"TOGGLE_TRACKING\"}\n",
            "{\"trigger\": \"sudden_jump\"}\n",
        );
        let (tx, mut rx) = mpsc::channel(16);

        let forwarded = forward_lines(spawn_line_reader(Cursor::new(input)), tx).await;
        assert_eq!(forwarded, 3);

        assert_eq!(
            rx.recv().await.unwrap(),
            InboundEvent::Sample(Coordinate::new(26.1445, 91.7362).unwrap())
        );
        assert_eq!(rx.recv().await.unwrap(), InboundEvent::Action(Action::ToggleTracking));
        assert_eq!(
            rx.recv().await.unwrap(),
            InboundEvent::Trigger { kind: AlertKind::SuddenJump, message: None }
        );
        assert!(rx.recv().await.is_none());
    }

    /// A reader that never reaches EOF, like an idle terminal.
    struct Idle;

    impl std::io::Read for Idle {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            std::thread::sleep(Duration::from_millis(5));
            Err(std::io::ErrorKind::Interrupted.into())
        }
    }

    #[tokio::test]
    async fn test_aborting_source_releases_queue_while_input_blocks() {
        let (tx, mut rx) = mpsc::channel::<InboundEvent>(4);
        let task = tokio::spawn(forward_lines(spawn_line_reader(Idle), tx));

        tokio::time::sleep(Duration::from_millis(20)).await;
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(closed, Ok(None)), "event queue still open after abort");
    }
}
