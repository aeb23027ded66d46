pub mod codec;
pub mod schema;
pub mod type_store;

const ARCHIVIST_MAGIC: &[u8; 8] = b"ARCHVST1";
const ARCHIVIST_HEADER_SIZE: usize = 12; // magic(8) + crc32(4)
