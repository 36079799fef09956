// libnfctag/src/device/emulation.rs

use std::time::Duration;

use crate::constants::{READ_CHUNK_LEN, TAG_CMD_HALT, TAG_CMD_READ};
use crate::device::handle::{Initialized, Reader};
use crate::protocol::parser::byte_at;
use crate::protocol::{Command, Reply};
use crate::{Error, Result};

impl Reader<Initialized> {
    /// Present `image` as a Type 2 tag to the next initiator that selects us.
    ///
    /// READ commands are answered with 16 bytes of the image starting at
    /// page `n` (4 bytes per page, zero padded past the end). A HALT ends the
    /// session successfully. Any other initiator command aborts it.
    pub async fn emulate_tag(&mut self, image: &[u8], timeout: Duration) -> Result<()> {
        let steps = self.model().before_emulation(timeout);
        self.run_model_steps(steps).await?;

        log::info!("waiting for an initiator ({} byte image)", image.len());
        let mut request = match self.exchange(&Command::emulate_type_a(), timeout).await? {
            Reply::TargetInit { data, .. } => data,
            other => return Err(other.into_unexpected()),
        };

        loop {
            match request.first().copied() {
                Some(TAG_CMD_READ) => {
                    let page = byte_at(&request, 1)?;
                    log::debug!("initiator READ page {}", page);
                    let data = read_window(image, page);
                    match self
                        .exchange(&Command::TgResponseToInitiator { data }, timeout)
                        .await?
                    {
                        Reply::ResponseToInitiator { .. } => {}
                        other => return Err(other.into_unexpected()),
                    }
                    request = match self.exchange(&Command::TgGetInitiatorCommand, timeout).await? {
                        Reply::GetInitiatorCommand { data, .. } => data,
                        other => return Err(other.into_unexpected()),
                    };
                }
                Some(TAG_CMD_HALT) => {
                    log::info!("initiator halted the emulated tag");
                    return Ok(());
                }
                Some(other) => return Err(Error::UnsupportedInitiatorCommand(other)),
                None => return Err(Error::UnexpectedReply("empty initiator command".into())),
            }
        }
    }
}

/// The 16 bytes a Type 2 tag returns for READ `page`.
pub fn read_window(image: &[u8], page: u8) -> Vec<u8> {
    let start = (page as usize * 4).min(image.len());
    let end = (start + READ_CHUNK_LEN).min(image.len());
    let mut out = image[start..end].to_vec();
    out.resize(READ_CHUNK_LEN, 0);
    out
}
