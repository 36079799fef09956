// libnfctag/src/constants.rs
//! Common protocol constants used across the crate

/// PN53x wire frame preamble: 0x00 0x00 0xFF
pub const PN53X_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// PN53x wire frame postamble: 0x00
pub const PN53X_POSTAMBLE: u8 = 0x00;

/// Extended-length marker following the preamble.
pub const PN53X_EXTENDED_MARKER: [u8; 2] = [0xFF, 0xFF];

/// Positive acknowledgement frame sent by the chip before a reply.
pub const PN53X_ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Negative acknowledgement frame.
pub const PN53X_NACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];

/// Host->chip direction byte (D4) and chip->host direction byte (D5)
pub const PN53X_HOST_TO_CHIP: u8 = 0xD4;
pub const PN53X_CHIP_TO_HOST: u8 = 0xD5;

/// PN53x command codes used by the engine.
pub const PN53X_CMD_IN_DATA_EXCHANGE: u8 = 0x40;
pub const PN53X_CMD_IN_DESELECT: u8 = 0x44;
pub const PN53X_CMD_IN_LIST_PASSIVE_TARGET: u8 = 0x4A;
pub const PN53X_CMD_IN_RELEASE: u8 = 0x52;
pub const PN53X_CMD_RF_CONFIGURATION: u8 = 0x32;
pub const PN53X_CMD_TG_INIT_AS_TARGET: u8 = 0x8C;
pub const PN53X_CMD_TG_GET_INITIATOR_COMMAND: u8 = 0x88;
pub const PN53X_CMD_TG_RESPONSE_TO_INITIATOR: u8 = 0x90;

/// CCID message types used by the ACR122.
pub const CCID_PC_TO_RDR_ESCAPE: u8 = 0x6B;
pub const CCID_PC_TO_RDR_ICC_POWER_ON: u8 = 0x62;
pub const CCID_RDR_TO_PC_DATA_BLOCK: u8 = 0x80;
pub const CCID_RDR_TO_PC_ESCAPE: u8 = 0x83;

/// CCID header length (type, 4-byte length, slot, seq, 3 reserved bytes).
pub const CCID_HEADER_LEN: usize = 10;

/// Pseudo-APDU class byte used by ACR122 vendor commands.
pub const ACR122_APDU_CLASS: u8 = 0xFF;

/// ISO 7816 status words reported by the ACR122 firmware.
pub const SW_SUCCESS: [u8; 2] = [0x90, 0x00];
pub const SW_FAILURE: [u8; 2] = [0x63, 0x00];

/// ISO 14443-3A tag commands.
pub const TAG_CMD_READ: u8 = 0x30;
pub const TAG_CMD_HALT: u8 = 0x50;
pub const TAG_CMD_MIFARE_AUTH_A: u8 = 0x60;
pub const TAG_CMD_MIFARE_AUTH_B: u8 = 0x61;
pub const TAG_CMD_MIFARE_WRITE: u8 = 0xA0;
pub const TAG_CMD_TYPE2_WRITE: u8 = 0xA2;

/// Bytes returned by a single READ command.
pub const READ_CHUNK_LEN: usize = 16;

/// NXP manufacturer code (first UID byte).
pub const NXP_MANUFACTURER_ID: u8 = 0x04;

/// USB identifiers of the supported readers.
pub const SCL3711_VENDOR_ID: u16 = 0x04E6;
pub const SCL3711_PRODUCT_ID: u16 = 0x5591;
pub const ACR122U_VENDOR_ID: u16 = 0x072F;
pub const ACR122U_PRODUCT_ID: u16 = 0x2200;
