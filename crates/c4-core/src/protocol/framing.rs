//! Async helpers that move whole messages over a byte stream.
//!
//! Messages have fixed sizes, so a read is simply `read_exact` of
//! [`MessageType::wire_len`] bytes followed by [`decode_message`].  Both
//! helpers are generic over tokio's async I/O traits so the same code drives
//! a `TcpStream` in production and an in-memory pipe in tests.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::protocol::codec::{decode_message, encode_message, ProtocolError};
use crate::protocol::messages::{MessageType, SessionMessage};

/// Largest encoded message (MOVE_ECHO).
const MAX_MESSAGE_LEN: usize = 8;

/// Errors from reading or writing one framed message.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The peer closed the stream or the socket failed.
    #[error("connection lost: {0}")]
    ConnectionLost(#[source] io::Error),

    /// The bytes arrived but do not form the expected message.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Reads exactly one message of the `expected` kind.
///
/// # Errors
///
/// [`FrameError::ConnectionLost`] on EOF or socket failure, including EOF in
/// the middle of a message.  [`FrameError::Protocol`] if the value is out of
/// range.
pub async fn read_message<R>(reader: &mut R, expected: MessageType) -> Result<SessionMessage, FrameError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = [0u8; MAX_MESSAGE_LEN];
    let frame = &mut buf[..expected.wire_len()];
    reader
        .read_exact(frame)
        .await
        .map_err(FrameError::ConnectionLost)?;

    let (msg, _) = decode_message(expected, frame)?;
    trace!(?msg, "read message");
    Ok(msg)
}

/// Writes one message and flushes it.
///
/// # Errors
///
/// [`FrameError::ConnectionLost`] if the stream is closed or fails.
pub async fn write_message<W>(writer: &mut W, msg: &SessionMessage) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let bytes = encode_message(msg);
    writer
        .write_all(&bytes)
        .await
        .map_err(FrameError::ConnectionLost)?;
    writer.flush().await.map_err(FrameError::ConnectionLost)?;
    trace!(?msg, "wrote message");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio_test::io::Builder;

    use super::*;
    use crate::protocol::messages::{PlayerId, StatusCode};

    #[tokio::test]
    async fn test_reads_messages_in_conversation_order() {
        let mut stream = Builder::new()
            .read(&[0, 0, 0, 2])
            .read(&[0, 0, 0, 4])
            .read(&[0, 0, 0, 5, 0, 0, 0, 1])
            .build();

        let assign = read_message(&mut stream, MessageType::PlayerAssign).await.unwrap();
        let status = read_message(&mut stream, MessageType::Status).await.unwrap();
        let echo = read_message(&mut stream, MessageType::MoveEcho).await.unwrap();

        assert_eq!(assign, SessionMessage::PlayerAssign(PlayerId::Two));
        assert_eq!(status, SessionMessage::Status(StatusCode::Proceed));
        assert_eq!(echo, SessionMessage::MoveEcho { row: 5, column: 1 });
    }

    #[tokio::test]
    async fn test_echo_split_across_reads_is_reassembled() {
        let mut stream = Builder::new()
            .read(&[0, 0, 0])
            .read(&[3, 0, 0, 0, 6])
            .build();

        let echo = read_message(&mut stream, MessageType::MoveEcho).await.unwrap();
        assert_eq!(echo, SessionMessage::MoveEcho { row: 3, column: 6 });
    }

    #[tokio::test]
    async fn test_eof_mid_message_is_connection_lost() {
        let mut stream = Builder::new().read(&[0, 0]).build();

        let err = read_message(&mut stream, MessageType::Move).await.unwrap_err();
        assert!(matches!(err, FrameError::ConnectionLost(_)));
    }

    #[tokio::test]
    async fn test_bad_status_value_is_protocol_error() {
        let mut stream = Builder::new().read(&[0, 0, 0, 9]).build();

        let err = read_message(&mut stream, MessageType::Status).await.unwrap_err();
        assert!(matches!(
            err,
            FrameError::Protocol(ProtocolError::UnknownStatusCode(9))
        ));
    }

    #[tokio::test]
    async fn test_write_move_sends_big_endian_column() {
        let mut stream = Builder::new().write(&[0, 0, 0, 3]).build();

        write_message(&mut stream, &SessionMessage::Move { column: 3 })
            .await
            .unwrap();
    }
}
