use crate::ports::outbound::ChecksumProvider;

/// Default checksum provider using crc32fast.
#[derive(Default, Clone, Copy)]
pub struct DefaultChecksumProvider;

impl ChecksumProvider for DefaultChecksumProvider {
    fn compute_crc32(&self, data: &[u8]) -> u32 {
        crc32fast::hash(data)
    }
}
