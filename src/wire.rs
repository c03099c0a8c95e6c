//! Wire framing for motion lines.
//!
//! Clients receive either the raw BVH line or an Axis Neuron record. The
//! Axis Neuron consumer expects one logical record per message with its own
//! framing instead of raw BVH line breaks, so the line terminator is
//! dropped and a fixed prologue/epilogue pair is wrapped around the rest.
//! Both literals go out with their trailing NUL byte — that is what has
//! always been on the wire, and consumers may depend on it.

use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Record prologue naming the avatar, trailing NUL included.
pub const NEURON_PROLOGUE: &[u8] = b"0 Avatarname \0";

/// Record epilogue: separator token plus CRLF, trailing NUL included.
pub const NEURON_EPILOGUE: &[u8] = b" ||\r\n\0";

/// Output framing for motion lines, fixed for the whole process at startup
/// and shared read-only by every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Send each motion line exactly as it is in the BVH file.
    Raw,
    /// Wrap each motion line in the Axis Neuron record framing.
    AxisNeuron,
}

impl OutputFormat {
    /// Map the command-line selector: 0 = raw, 1 = Axis Neuron.
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            0 => Some(OutputFormat::Raw),
            1 => Some(OutputFormat::AxisNeuron),
            _ => None,
        }
    }

    /// The ordered transmission units for one motion line.
    ///
    /// Raw output is the line itself, terminator and all. Axis Neuron
    /// framing excludes the line's final byte and adds the prologue and
    /// epilogue; each unit goes out as its own write.
    pub fn segments(self, line: &[u8]) -> Vec<&[u8]> {
        match self {
            OutputFormat::Raw => vec![line],
            OutputFormat::AxisNeuron => {
                let body = &line[..line.len().saturating_sub(1)];
                vec![NEURON_PROLOGUE, body, NEURON_EPILOGUE]
            }
        }
    }

    /// Encode one motion line into a single byte buffer.
    pub fn encode(self, line: &[u8]) -> Vec<u8> {
        self.segments(line).concat()
    }
}

/// Send one motion line to a peer in the given format.
///
/// Each transmission unit is written separately, in order. A failed write
/// aborts the remaining units; nothing already sent is retried or rolled
/// back.
pub async fn send_line<W>(writer: &mut W, line: &[u8], format: OutputFormat) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    for segment in format.segments(line) {
        writer.write_all(segment).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &[u8] = b"0.0 1.0 2.0\n";

    #[test]
    fn raw_is_the_identity() {
        assert_eq!(OutputFormat::Raw.encode(LINE), LINE);
        assert_eq!(OutputFormat::Raw.segments(LINE), vec![LINE]);
    }

    #[test]
    fn axis_neuron_wraps_and_drops_the_terminator() {
        let encoded = OutputFormat::AxisNeuron.encode(LINE);
        assert!(encoded.starts_with(NEURON_PROLOGUE));
        assert!(encoded.ends_with(NEURON_EPILOGUE));

        let body = &encoded[NEURON_PROLOGUE.len()..encoded.len() - NEURON_EPILOGUE.len()];
        assert_eq!(body, b"0.0 1.0 2.0");
    }

    #[test]
    fn axis_neuron_literals_keep_their_nul_bytes() {
        assert_eq!(NEURON_PROLOGUE.len(), 14);
        assert_eq!(NEURON_PROLOGUE.last(), Some(&0u8));
        assert_eq!(NEURON_EPILOGUE.len(), 6);
        assert_eq!(NEURON_EPILOGUE.last(), Some(&0u8));

        let encoded = OutputFormat::AxisNeuron.encode(LINE);
        assert_eq!(encoded.iter().filter(|&&byte| byte == 0).count(), 2);
    }

    #[test]
    fn axis_neuron_sends_three_units() {
        let segments = OutputFormat::AxisNeuron.segments(LINE);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], NEURON_PROLOGUE);
        assert_eq!(segments[1], b"0.0 1.0 2.0");
        assert_eq!(segments[2], NEURON_EPILOGUE);
    }

    #[test]
    fn empty_line_does_not_underflow() {
        let encoded = OutputFormat::AxisNeuron.encode(b"");
        assert_eq!(encoded, [NEURON_PROLOGUE, NEURON_EPILOGUE].concat());
    }

    #[test]
    fn selector_mapping_matches_the_cli_contract() {
        assert_eq!(OutputFormat::from_selector(0), Some(OutputFormat::Raw));
        assert_eq!(OutputFormat::from_selector(1), Some(OutputFormat::AxisNeuron));
        assert_eq!(OutputFormat::from_selector(2), None);
    }

    #[tokio::test]
    async fn send_line_writes_every_unit_in_order() {
        let (mut near, mut far) = tokio::io::duplex(256);

        send_line(&mut near, LINE, OutputFormat::AxisNeuron).await.expect("duplex write");
        drop(near);

        let mut received = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut far, &mut received)
            .await
            .expect("duplex read");
        assert_eq!(received, OutputFormat::AxisNeuron.encode(LINE));
    }
}
