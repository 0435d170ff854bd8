// libstk-rs/libstk/src/service/builder.rs

//! Service builder.

use crate::config::ServiceConfig;
use crate::pipeline::decoder::CommandDecoder;
use crate::protocol::tlv::TagRegistry;
use crate::service::engine::StkService;
use crate::service::scheduler::Scheduler;
use crate::transport::{RadioInterface, ToolkitListener};
use crate::{Error, Result};

/// Helper to assemble a [`StkService`] from its collaborators.
#[derive(Default)]
pub struct StkServiceBuilder {
    config: ServiceConfig,
    radio: Option<Box<dyn RadioInterface>>,
    listener: Option<Box<dyn ToolkitListener>>,
    scheduler: Option<Box<dyn Scheduler>>,
    registry: Option<TagRegistry>,
}

impl StkServiceBuilder {
    /// Empty builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine settings.
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Radio side. Required.
    pub fn with_radio(mut self, radio: Box<dyn RadioInterface>) -> Self {
        self.radio = Some(radio);
        self
    }

    /// Application side. Required.
    pub fn with_listener(mut self, listener: Box<dyn ToolkitListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Timer source for DTMF pauses. Required.
    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Tag set accepted by the decoder; defaults to the standard tags plus
    /// the DTMF string tag.
    pub fn with_tag_registry(mut self, registry: TagRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Configuration the service will be built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Consume the builder. Radio, listener and scheduler are required.
    pub fn build(self) -> Result<StkService> {
        let radio = self
            .radio
            .ok_or_else(|| Error::Transport("no radio interface configured".into()))?;
        let listener = self
            .listener
            .ok_or_else(|| Error::Transport("no toolkit listener configured".into()))?;
        let scheduler = self
            .scheduler
            .ok_or_else(|| Error::Transport("no scheduler configured".into()))?;
        let decoder = CommandDecoder::new(self.registry.unwrap_or_default());
        Ok(StkService::new(
            self.config,
            radio,
            listener,
            scheduler,
            decoder,
        ))
    }
}
