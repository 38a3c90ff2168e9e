//! The single-task node loop.
//!
//! One task owns everything: the controller link, the switch sampler, and
//! the dispatcher. Each iteration does at most one bounded unit of link I/O
//! (wait up to one poll interval for an inbound frame, or one reconnection
//! attempt) and then takes one switch sample, so the switch is never starved
//! by controller traffic and no locking is needed anywhere.
//!
//! Only the startup connect blocks. Once the steady loop is running, an
//! outage degrades the link side to periodic single-shot reconnection
//! attempts while sampling continues every tick: a button press during an
//! outage still debounces and commits on time (its request is simply
//! dropped by the notifier's disconnected path).

use std::time::Instant;

use tracing::{info, warn};

use doorlink_core::TickClock;
use doorlink_hardware::{Debouncer, IndicatorPanel, SwitchInput};
use doorlink_network::{ControllerLink, MessageSink};

use crate::config::NodeConfig;
use crate::dispatcher::Dispatcher;
use crate::notifier::Notifier;

/// Ties the hardware, the link, and the dispatcher into one run loop.
pub struct NodeRuntime<SW: SwitchInput, P: IndicatorPanel> {
    config: NodeConfig,
    link: ControllerLink,
    switch: SW,
    debouncer: Debouncer,
    dispatcher: Dispatcher<P>,
    /// Earliest instant the next reconnection attempt may run. Only
    /// meaningful while the link is down.
    retry_at: Instant,
}

impl<SW: SwitchInput, P: IndicatorPanel> NodeRuntime<SW, P> {
    /// Assemble a runtime from its parts. Nothing is connected yet.
    pub fn new(config: NodeConfig, switch: SW, panel: P) -> Self {
        let link = ControllerLink::new(config.link_config());
        // The switch rests released at boot.
        let debouncer = Debouncer::new(config.debounce_window, false, Instant::now());
        let dispatcher = Dispatcher::new(panel, Notifier::new(TickClock::new()));
        Self {
            config,
            link,
            switch,
            debouncer,
            dispatcher,
            retry_at: Instant::now(),
        }
    }

    /// Run the node forever.
    ///
    /// Startup: light the indicators, connect (retrying at the fixed
    /// interval until the controller answers), announce the initial state.
    /// This is the only place the node waits on the network without
    /// sampling; after it, the steady loop takes over.
    pub async fn run(mut self) {
        info!(door_id = %self.config.door_id, "Doorlink node starting");

        self.dispatcher.initialize().await;
        self.link.connect_with_retry().await;
        self.dispatcher.on_connected(&mut self.link).await;

        loop {
            self.tick().await;
        }
    }

    /// One loop iteration: one bounded link step, then one sample.
    async fn tick(&mut self) {
        if self.link.is_connected() {
            match tokio::time::timeout(self.config.poll_interval, self.link.recv()).await {
                Ok(Ok(message)) => {
                    self.dispatcher.on_inbound(message, &mut self.link).await;
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "Controller link lost");
                    // First retry runs on the next tick.
                    self.retry_at = Instant::now();
                }
                // No inbound traffic this interval; fall through to sampling.
                Err(_elapsed) => {}
            }
        } else {
            self.step_reconnect().await;
        }

        self.sample_switch().await;
    }

    /// At most one reconnection attempt per elapsed retry interval.
    ///
    /// A failed attempt schedules the next one and returns; it never loops,
    /// so sampling below keeps running throughout an outage.
    async fn step_reconnect(&mut self) {
        if Instant::now() < self.retry_at {
            // Waiting out the retry interval; keep the loop cadence.
            tokio::time::sleep(self.config.poll_interval).await;
            return;
        }

        match self.link.connect().await {
            Ok(()) => {
                self.dispatcher.on_connected(&mut self.link).await;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    retry_in_ms = self.config.reconnect_interval.as_millis() as u64,
                    "Controller unreachable, will retry"
                );
                self.retry_at = Instant::now() + self.config.reconnect_interval;
            }
        }
    }

    async fn sample_switch(&mut self) {
        let raw = match self.switch.read_level().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Switch read failed, skipping sample");
                return;
            }
        };

        if let Some(edge) = self.debouncer.sample(raw, Instant::now()) {
            self.dispatcher.on_local_edge(edge, &mut self.link).await;
        }
    }
}
