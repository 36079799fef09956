// libnfctag/src/protocol/responses/passive_target.rs

use crate::protocol::parser::{be_u16_at, byte_at, slice_at};
use crate::types::{TagType, Uid};
use crate::Result;

/// One target reported by InListPassiveTarget at 106 kbps Type A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveTarget {
    pub target_index: u8,
    pub sens_res: u16,
    pub sel_res: u8,
    pub uid: Uid,
    pub tag_type: TagType,
}

impl PassiveTarget {
    pub fn id_length(&self) -> usize {
        self.uid.len()
    }
}

/// Decoded InListPassiveTarget reply. `target` is `None` unless exactly one
/// target answered as target number 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveTargetList {
    pub tag_count: u8,
    pub target: Option<PassiveTarget>,
}

/// Raw target fields, before the tag type is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFields {
    pub target_index: u8,
    pub sens_res: u16,
    pub sel_res: u8,
}

/// Read NbTg and, when present, the fixed target header that follows it.
pub fn target_fields(data: &[u8]) -> Result<(u8, Option<TargetFields>)> {
    let tag_count = byte_at(data, 0)?;
    if tag_count == 0 {
        return Ok((0, None));
    }
    Ok((
        tag_count,
        Some(TargetFields {
            target_index: byte_at(data, 1)?,
            sens_res: be_u16_at(data, 2)?,
            sel_res: byte_at(data, 4)?,
        }),
    ))
}

/// Decode the data following `D5 4B`. Returns `Ok(None)` when a single
/// target answered with a SENS_RES that maps to no supported tag type.
pub fn decode_passive_target_list(data: &[u8]) -> Result<Option<PassiveTargetList>> {
    let (tag_count, fields) = target_fields(data)?;
    let fields = match fields {
        Some(f) if tag_count == 1 && f.target_index == 1 => f,
        _ => {
            log::debug!("InListPassiveTarget: {} targets, no single selection", tag_count);
            return Ok(Some(PassiveTargetList {
                tag_count,
                target: None,
            }));
        }
    };

    let id_len = byte_at(data, 5)? as usize;
    let uid = Uid::try_from(slice_at(data, 6, id_len)?)?;
    log::debug!(
        "InListPassiveTarget SENS_RES={:#06x} SEL_RES={:#04x} uid={}",
        fields.sens_res,
        fields.sel_res,
        uid.to_hex()
    );

    let Some(tag_type) = TagType::from_sens_res(fields.sens_res) else {
        return Ok(None);
    };

    Ok(Some(PassiveTargetList {
        tag_count,
        target: Some(PassiveTarget {
            target_index: fields.target_index,
            sens_res: fields.sens_res,
            sel_res: fields.sel_res,
            uid,
            tag_type,
        }),
    }))
}
