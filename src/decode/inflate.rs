//! Raw deflate decompression
//!
//! Profiles are stored as a bare deflate stream: no zlib header, no trailing
//! checksum (the equivalent of a negative window-bits value). A stream that
//! ends before its final block is reported as corrupt; no partial output is
//! returned.

use crate::{Result, VapError};
use flate2::{Decompress, FlushDecompress, Status};

/// Output growth step while inflating (64 KiB)
const INFLATE_CHUNK: usize = 64 * 1024;

/// Inflate a raw deflate stream, refusing output larger than `limit` bytes
pub fn inflate(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(VapError::CorruptArchive("empty stream".to_string()));
    }

    let mut inflater = Decompress::new(false);
    let ceiling = limit.saturating_add(1);
    let mut output = Vec::with_capacity(data.len().saturating_mul(4).min(ceiling));

    loop {
        if output.len() == output.capacity() {
            let room = ceiling.saturating_sub(output.len()).min(INFLATE_CHUNK);
            if room == 0 {
                return Err(VapError::BufferTooLarge { limit });
            }
            output.reserve(room);
        }

        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status = inflater
            .decompress_vec(&data[consumed..], &mut output, FlushDecompress::None)
            .map_err(|e| VapError::CorruptArchive(e.to_string()))?;

        if output.len() > limit {
            return Err(VapError::BufferTooLarge { limit });
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let stalled = inflater.total_in() as usize == consumed
                    && inflater.total_out() == produced;
                if stalled && output.len() < output.capacity() {
                    return Err(VapError::CorruptArchive(format!(
                        "stream truncated after {} of {} bytes",
                        consumed,
                        data.len()
                    )));
                }
            }
        }
    }

    log::debug!("Inflated {} bytes to {} bytes", data.len(), output.len());
    Ok(output)
}
