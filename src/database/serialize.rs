// Tue Jan 13 2026 - Alex

use crate::database::{CompileError, Database};
use bytes::{Buf, BufMut, BytesMut};

pub const MAGIC: &[u8; 4] = b"MSDB";
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 8;

impl Database {
    /// `MSDB`, little-endian format version, then the JSON payload.
    pub fn serialize(&self) -> Result<Vec<u8>, CompileError> {
        let payload =
            serde_json::to_vec(self).map_err(|e| CompileError::Serialization(e.to_string()))?;

        let mut buf = BytesMut::with_capacity(HEADER_LEN + payload.len());
        buf.put_slice(MAGIC);
        buf.put_u32_le(FORMAT_VERSION);
        buf.put_slice(&payload);

        Ok(buf.to_vec())
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, CompileError> {
        if data.len() < HEADER_LEN {
            return Err(CompileError::IncompatibleFormat(format!(
                "truncated header: {} bytes",
                data.len()
            )));
        }

        let mut buf = data;
        let mut magic = [0u8; 4];
        buf.copy_to_slice(&mut magic);
        if &magic != MAGIC {
            return Err(CompileError::IncompatibleFormat("bad magic".to_string()));
        }

        let version = buf.get_u32_le();
        if version != FORMAT_VERSION {
            return Err(CompileError::IncompatibleFormat(format!(
                "format version {} is not supported (expected {})",
                version, FORMAT_VERSION
            )));
        }

        let db: Database = serde_json::from_slice(buf)
            .map_err(|e| CompileError::IncompatibleFormat(e.to_string()))?;
        db.validate().map_err(CompileError::IncompatibleFormat)?;

        log::debug!("loaded database with {} patterns", db.pattern_count());
        Ok(db)
    }
}
