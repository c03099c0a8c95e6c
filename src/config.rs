//! Command-line surface.
//!
//! Four positional parameters, checked before any resource is opened. A
//! wrong count or an unparsable value prints the usage text and exits
//! nonzero.

use std::path::PathBuf;

use clap::Parser;

use crate::wire::OutputFormat;

/// Stream the motion lines of a BVH file to every connected TCP client.
///
/// The delay between motion lines can be configured or read from the BVH
/// file. When all motion lines have been sent the stream loops back to the
/// first one.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ServerArgs {
    /// TCP port number to listen on.
    pub port: u16,

    /// Delay between motion lines in microseconds. Set to 0 if the frame
    /// time from the BVH file should be used.
    pub frametime: u64,

    /// Output format: 0 sends each line as it is in the BVH file, 1 uses
    /// the Axis Neuron format.
    #[arg(value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Name and path of the BVH file to be sent.
    pub bvhfile: PathBuf,
}

fn parse_output_format(raw: &str) -> Result<OutputFormat, String> {
    let selector: u8 =
        raw.parse().map_err(|_| format!("format selector must be a number, got \"{raw}\""))?;
    OutputFormat::from_selector(selector)
        .ok_or_else(|| format!("format must be 0 (raw) or 1 (Axis Neuron), got {selector}"))
}
