// libnfctag/src/device/handle.rs

use std::marker::PhantomData;
use std::time::Duration;

use tokio::time::{Instant, timeout_at};

use crate::constants::PN53X_CMD_IN_LIST_PASSIVE_TARGET;
use crate::device::config::ReaderConfig;
use crate::device::models::{ReaderModel, Step, create_model_for};
use crate::device::registry::Presence;
use crate::protocol::commands::pn53x::TARGET_1;
use crate::protocol::parser::reply_data;
use crate::protocol::responses::passive_target::target_fields;
use crate::protocol::{Command, Decoded, Frame, PassiveTargetList, Reply, classify};
use crate::transport::Transport;
use crate::types::{Chipset, KeyType, MifareKey, TagIdentity, Uid};
use crate::utils::{HexDump, remaining};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Reader handle that enforces initialization state at compile time.
///
/// Exactly one exchange is outstanding at a time: every method takes
/// `&mut self` and awaits the reply (or its timeout) before returning.
pub struct Reader<State = Uninitialized> {
    transport: Box<dyn Transport>,
    chipset: Chipset,
    model: Box<dyn ReaderModel>,
    config: ReaderConfig,
    presence: Option<Presence>,
    /// Set while an exchange is in flight. Still set on the next send means
    /// the previous exchange was abandoned and its reply may be queued.
    stale: bool,
    _state: PhantomData<State>,
}

impl Reader<Uninitialized> {
    /// Create a Reader from an existing Transport instance with the default
    /// configuration.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        Self::with_config(transport, ReaderConfig::default(), None)
    }

    pub fn with_config(
        transport: Box<dyn Transport>,
        config: ReaderConfig,
        presence: Option<Presence>,
    ) -> Self {
        let chipset = transport.chipset();
        Self {
            transport,
            chipset,
            model: create_model_for(chipset),
            config,
            presence,
            stale: false,
            _state: PhantomData,
        }
    }

    /// Run the model's init sequence. Returns an initialized Reader on
    /// success.
    pub async fn initialize(self) -> Result<Reader<Initialized>> {
        let mut this = self;
        log::debug!("initializing {} reader", this.model.name());
        let steps = this.model.init_sequence();
        this.run_steps(steps).await?;
        log::info!("{} reader ready", this.model.name());

        Ok(Reader {
            transport: this.transport,
            chipset: this.chipset,
            model: this.model,
            config: this.config,
            presence: this.presence,
            stale: this.stale,
            _state: PhantomData,
        })
    }
}

impl<State> Reader<State> {
    pub fn chipset(&self) -> Chipset {
        self.chipset
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Send one frame and return the body of the first non-ACK frame that
    /// comes back.
    async fn transmit(&mut self, frame: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        if let Some(presence) = &self.presence {
            if !presence.is_present() {
                return Err(Error::DeviceRemoved);
            }
        }
        if self.stale {
            let dropped = self.transport.discard_pending();
            if dropped > 0 {
                log::debug!("dropped {} frames of an abandoned exchange", dropped);
            }
        }

        self.stale = true;
        log::trace!("> {:?}", HexDump::spaced(frame));
        self.transport.send(frame).await?;

        let deadline = Instant::now() + timeout;
        loop {
            let received = match timeout_at(
                deadline,
                next_frame(&mut *self.transport, self.presence.as_mut()),
            )
            .await
            {
                Ok(frame) => frame?,
                Err(_) => {
                    log::debug!("exchange timed out after {:?}", timeout);
                    return Err(Error::Timeout);
                }
            };
            log::trace!("< {:?}", HexDump::spaced(&received));

            match Frame::decode(self.chipset, &received)? {
                Decoded::Ack => {
                    log::trace!("ack absorbed");
                    continue;
                }
                Decoded::Payload(body) => {
                    self.stale = false;
                    return Ok(body);
                }
            }
        }
    }

    async fn exchange_inner(&mut self, cmd: &Command, timeout: Duration) -> Result<Reply> {
        let frame = cmd.to_frame(self.chipset)?;
        let body = self.transmit(&frame, timeout).await?;
        classify(&body)
    }

    async fn run_step(&mut self, step: Step) -> Result<Reply> {
        let timeout = self.config.command_timeout;
        match step {
            Step::Command(cmd) => self.exchange_inner(&cmd, timeout).await,
            Step::Escape(escape) => {
                log::debug!("escape {:?}", escape);
                let body = self.transmit(&escape.encode(), timeout).await?;
                classify(&body)
            }
            Step::Raw { frame, best_effort } => match self.transmit(&frame, timeout).await {
                Ok(body) => Ok(Reply::Unrecognized(body)),
                Err(Error::DeviceRemoved) => Err(Error::DeviceRemoved),
                Err(e) if best_effort => {
                    log::warn!("ignoring failed step {:?}: {}", HexDump::spaced(&frame), e);
                    Ok(Reply::Unrecognized(Vec::new()))
                }
                Err(e) => Err(e),
            },
        }
    }

    async fn run_steps(&mut self, steps: Vec<Step>) -> Result<()> {
        for step in steps {
            let is_escape = matches!(step, Step::Escape(_));
            let reply = self.run_step(step).await?;
            if is_escape && reply == Reply::SecondChipsetFailure {
                return Err(Error::UnexpectedReply("reader rejected escape".into()));
            }
        }
        Ok(())
    }
}

async fn next_frame(
    transport: &mut dyn Transport,
    presence: Option<&mut Presence>,
) -> Result<Vec<u8>> {
    match presence {
        Some(presence) => tokio::select! {
            frame = transport.receive() => frame,
            _ = presence.removed() => Err(Error::DeviceRemoved),
        },
        None => transport.receive().await,
    }
}

impl Reader<Initialized> {
    /// Execute a command and return the classified reply.
    pub async fn exchange(&mut self, cmd: &Command, timeout: Duration) -> Result<Reply> {
        self.exchange_inner(cmd, timeout).await
    }

    /// Run model-specific steps (used by emulation).
    pub(crate) async fn run_model_steps(&mut self, steps: Vec<Step>) -> Result<()> {
        self.run_steps(steps).await
    }

    pub(crate) fn model(&self) -> &dyn ReaderModel {
        &*self.model
    }

    /// Look for a single 106 kbps Type A target. A field with zero or
    /// several targets is reported through `tag_count`, not as an error.
    pub async fn wait_for_passive_target(&mut self, timeout: Duration) -> Result<PassiveTargetList> {
        let steps = self.model.before_passive_target(timeout);
        self.run_steps(steps).await?;

        match self.exchange(&Command::list_single_type_a(), timeout).await {
            Ok(Reply::PassiveTargetList(list)) => Ok(list),
            Ok(Reply::Unrecognized(body)) => Err(unsupported_target(body)),
            Ok(other) => Err(other.into_unexpected()),
            Err(Error::Timeout) => {
                self.abort().await;
                Err(Error::Timeout)
            }
            Err(e) => Err(e),
        }
    }

    /// Poll for a tag every `poll_interval` until one shows up or `timeout`
    /// expires.
    pub async fn wait_for_tag(&mut self, timeout: Duration) -> Result<TagIdentity> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = remaining(deadline).ok_or(Error::Timeout)?;
            match self.wait_for_passive_target(left).await {
                Ok(PassiveTargetList {
                    target: Some(target),
                    ..
                }) => {
                    log::info!("found {} tag {}", target.tag_type, target.uid.to_hex());
                    return Ok(TagIdentity {
                        tag_type: target.tag_type,
                        uid: target.uid,
                    });
                }
                Ok(list) => log::debug!("{} targets in field, polling again", list.tag_count),
                Err(Error::Timeout) => {}
                Err(e) => return Err(e),
            }
            let left = remaining(deadline).ok_or(Error::Timeout)?;
            tokio::time::sleep(self.config.poll_interval.min(left)).await;
        }
    }

    /// Send a tag command to the selected target and return its answer.
    pub async fn data_exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        let timeout = self.config.data_exchange_timeout;
        match self.exchange(&Command::exchange(request), timeout).await? {
            Reply::DataExchange { data, .. } => Ok(data),
            other => Err(other.into_unexpected()),
        }
    }

    /// Authenticate `block` with `key` in slot `key_type`. Returns
    /// `Ok(false)` when the tag or reader rejects the key.
    pub async fn authenticate(
        &mut self,
        block: u8,
        key_type: KeyType,
        key: &MifareKey,
        uid: &Uid,
    ) -> Result<bool> {
        let steps = self.model.authentication_steps(block, key_type, key, uid);
        for step in steps {
            match self.run_step(step).await {
                Ok(Reply::SecondChipsetFailure) => return self.rejected(uid).await,
                Ok(_) => {}
                Err(Error::ReaderStatus {
                    status, message, ..
                }) => {
                    log::debug!("key {} refused: {:#04x} {}", key_type, status, message);
                    return self.rejected(uid).await;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }

    async fn rejected(&mut self, uid: &Uid) -> Result<bool> {
        if self.chipset == Chipset::Pn533 {
            // a failed MIFARE AUTH halts the tag; select it again
            self.reselect(uid).await?;
        }
        Ok(false)
    }

    async fn reselect(&mut self, uid: &Uid) -> Result<()> {
        let timeout = self.config.command_timeout;
        match self.exchange(&Command::list_single_type_a(), timeout).await? {
            Reply::PassiveTargetList(PassiveTargetList {
                target: Some(target),
                ..
            }) if &target.uid == uid => Ok(()),
            Reply::PassiveTargetList(_) => {
                Err(Error::UnexpectedReply("tag changed while authenticating".into()))
            }
            other => Err(other.into_unexpected()),
        }
    }

    /// Deselect and release the current target.
    pub async fn release_target(&mut self) -> Result<()> {
        let timeout = self.config.command_timeout;
        let deselect = self
            .exchange(&Command::InDeselect { target: TARGET_1 }, timeout)
            .await;
        let release = self
            .exchange(&Command::InRelease { target: TARGET_1 }, timeout)
            .await;
        deselect?;
        release?;
        Ok(())
    }

    /// Release any target and drop the reader.
    pub async fn close(mut self) -> Result<()> {
        let result = self.release_target().await;
        if let Err(e) = &result {
            log::warn!("release on close failed: {}", e);
        }
        result
    }

    /// Cancel whatever command the chip is still executing.
    async fn abort(&mut self) {
        log::debug!("aborting pending command");
        if let Err(e) = self.transport.send(&Frame::ack()).await {
            log::warn!("abort failed: {}", e);
        }
    }
}

fn unsupported_target(body: Vec<u8>) -> Error {
    let fields = reply_data(&body, PN53X_CMD_IN_LIST_PASSIVE_TARGET)
        .and_then(target_fields)
        .ok()
        .and_then(|(_, fields)| fields);
    match fields {
        Some(fields) => Error::UnsupportedTarget {
            sens_res: fields.sens_res,
            sel_res: fields.sel_res,
        },
        None => Reply::Unrecognized(body).into_unexpected(),
    }
}
