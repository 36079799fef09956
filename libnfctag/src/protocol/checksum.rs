// libnfctag/src/protocol/checksum.rs

/// Compute the Length Checksum (LCS) of a normal PN53x frame.
/// LCS = 0x100 - length (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute the LCS of an extended frame from both length bytes.
/// LCS = 0x100 - (len_hi + len_lo) (mod 256)
pub fn lcs_extended(len_hi: u8, len_lo: u8) -> u8 {
    0u8.wrapping_sub(len_hi.wrapping_add(len_lo))
}

/// Compute the Data Checksum (DCS) over the frame body (TFI, command, data).
/// DCS = 0x100 - (sum(body) & 0xff)
pub fn dcs(body: &[u8]) -> u8 {
    let sum = body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}
