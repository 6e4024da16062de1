use crate::data::{DataType, SimData};
use crate::error::SessionError;
use crate::events::{Subscription, SubscriptionKind, SystemEvent, GROUP_ID, GROUP_PRIORITY_HIGHEST};
use crate::exception::exception_name;
use crate::host::{SimHost, SIMOBJECT_TYPE_USER};
use crate::recv::Message;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Request id used for the periodic user aircraft data request.
pub const SIM_DATA_REQUEST_ID: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Host sent QUIT, the current drain pass finishes and the loop stops.
    Stopping,
    /// Connection closed.
    Terminated,
}

/// One open connection plus everything learned from it.
pub struct Session<H: SimHost> {
    host: H,
    subscriptions: HashMap<u32, Subscription>,
    state: SessionState,
    sim_data: Option<SimData>,
}

impl<H: SimHost> Session<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            subscriptions: HashMap::new(),
            state: SessionState::Running,
            sim_data: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn quit_requested(&self) -> bool {
        self.state != SessionState::Running
    }

    /// Last simulation data received, if any.
    pub fn sim_data(&self) -> Option<SimData> {
        self.sim_data
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Subscribe to every [`SystemEvent`] and raise the group priority, the
    /// fixed setup the probe runs at startup. Returns how many registrations failed.
    pub fn subscribe_system_events(&mut self) -> usize {
        let mut failed = SystemEvent::ALL
            .iter()
            .filter(|event| !self.register_system_event(event.subscription()))
            .count();
        if !self.set_group_priority() {
            failed += 1;
        }
        failed
    }

    /// Subscribe to a host system event and put it in the notification group.
    pub fn register_system_event(&mut self, subscription: Subscription) -> bool {
        self.register(SubscriptionKind::System, subscription)
    }

    /// Map a client event onto a sim event and put it in the notification group.
    pub fn register_client_event(&mut self, subscription: Subscription) -> bool {
        self.register(SubscriptionKind::Client, subscription)
    }

    fn register(&mut self, kind: SubscriptionKind, subscription: Subscription) -> bool {
        let id = subscription.id;
        let name = subscription.host_name;
        match self.try_register(kind, subscription) {
            Ok(()) => {
                debug!(id, name, ?kind, "subscribed");
                true
            }
            Err(err) => {
                warn!(id, name, ?kind, %err, "subscription failed");
                false
            }
        }
    }

    fn try_register(
        &mut self,
        kind: SubscriptionKind,
        subscription: Subscription,
    ) -> Result<(), SessionError> {
        if self.subscriptions.contains_key(&subscription.id) {
            return Err(SessionError::DuplicateSubscription(subscription.id));
        }

        match kind {
            SubscriptionKind::System => self
                .host
                .subscribe_to_system_event(subscription.id, subscription.host_name)?,
            SubscriptionKind::Client => self
                .host
                .map_client_event_to_sim_event(subscription.id, subscription.host_name)?,
        }

        let (id, masked) = (subscription.id, subscription.masked);
        self.subscriptions.insert(id, subscription);

        self.host
            .add_client_event_to_notification_group(GROUP_ID, id, masked)?;
        Ok(())
    }

    /// Without a priority the group's events aren't delivered.
    pub fn set_group_priority(&mut self) -> bool {
        match self
            .host
            .set_notification_group_priority(GROUP_ID, GROUP_PRIORITY_HIGHEST)
        {
            Ok(()) => true,
            Err(err) => {
                warn!(group = GROUP_ID, %err, "failed to set group priority");
                false
            }
        }
    }

    pub fn register_value_definition(
        &mut self,
        define_id: u32,
        data_type: DataType,
        datum_name: &str,
        units: &str,
    ) -> bool {
        let units = if data_type.is_struct() { None } else { Some(units) };
        match self
            .host
            .add_to_data_definition(define_id, datum_name, units, data_type)
        {
            Ok(()) => true,
            Err(err) => {
                warn!(define_id, datum_name, ?data_type, %err, "failed to add data definition");
                false
            }
        }
    }

    /// Ask the host for [`SimData`] of the user aircraft. The answer arrives as
    /// SIMOBJECT_DATA_BYTYPE on a later drain.
    pub fn request_sim_data(&mut self) -> bool {
        match self.host.request_data_on_sim_object_type(
            SIM_DATA_REQUEST_ID,
            SimData::DEFINITION_ID,
            0,
            SIMOBJECT_TYPE_USER,
        ) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "sim data request failed");
                false
            }
        }
    }

    /// Dispatch everything the host has queued. Returns the number of messages
    /// pulled, undecodable ones included.
    pub fn drain_and_dispatch(&mut self) -> usize {
        if self.state == SessionState::Terminated {
            return 0;
        }

        let mut pulled = 0;
        while let Some(next) = self.host.next_message() {
            pulled += 1;
            match next {
                Ok(message) => {
                    self.dispatch(message);
                }
                Err(err) => warn!(%err, "dropping undecodable message"),
            }
        }
        pulled
    }

    /// Handle one message. Returns the console line it produced, if any.
    pub fn dispatch(&mut self, message: Message) -> Option<String> {
        match message {
            Message::Null => Some(log_line("SIMCONNECT_RECV_ID_NULL".to_string())),
            Message::Exception {
                code,
                send_id,
                index,
            } => {
                let line = format!("SIMCONNECT_RECV_ID_EXCEPTION = {}", exception_name(code));
                info!(code, send_id, index, "{}", line);
                Some(line)
            }
            Message::Open {
                application,
                version,
                simconnect_version,
            } => {
                let line = "SIMCONNECT_RECV_ID_OPEN".to_string();
                info!(
                    %application,
                    %version,
                    %simconnect_version,
                    "{}",
                    line
                );
                Some(line)
            }
            Message::Quit => {
                if self.state == SessionState::Running {
                    self.state = SessionState::Stopping;
                }
                Some(log_line("SIMCONNECT_RECV_ID_QUIT".to_string()))
            }
            Message::EventFilename {
                event_id,
                file_name,
                ..
            } => {
                debug!(event_id, %file_name, "file event");
                Some(log_line("SIMCONNECT_RECV_ID_EVENT_FILENAME".to_string()))
            }
            Message::Event { event_id, data, .. } => self
                .subscriptions
                .get(&event_id)
                .map(|subscription| log_line(format!("{} = {}", subscription.label, data as i32))),
            Message::SimObjectDataByType {
                request_id,
                define_id,
                payload,
                ..
            } => {
                self.store_sim_data(request_id, define_id, &payload);
                None
            }
            Message::Other { id } => Some(log_line(format!("EVENT TYPE = {}", id))),
        }
    }

    fn store_sim_data(&mut self, request_id: u32, define_id: u32, payload: &[u8]) {
        if define_id != SimData::DEFINITION_ID {
            debug!(request_id, define_id, "data for unknown definition");
            return;
        }

        match SimData::from_payload(payload) {
            Ok(data) => {
                if self.sim_data != Some(data) {
                    debug!("simulation_time = {}", data.simulation_time);
                }
                self.sim_data = Some(data);
            }
            Err(err) => warn!(request_id, define_id, %err, "dropping SIMOBJECT_DATA_BYTYPE"),
        }
    }

    /// Poll the host every `poll_interval` until it sends QUIT. The drain pass
    /// that sees QUIT runs to completion, no sleep follows it.
    pub fn run(&mut self, poll_interval: Duration, request_sim_data: bool) {
        let mut request_sim_data = request_sim_data;

        while self.state == SessionState::Running {
            if request_sim_data && !self.request_sim_data() {
                warn!("no longer requesting sim data");
                request_sim_data = false;
            }

            self.drain_and_dispatch();

            if self.quit_requested() {
                break;
            }
            std::thread::sleep(poll_interval);
        }

        info!(state = ?self.state, "poll loop finished");
    }

    /// Release the connection. Calling it again does nothing.
    pub fn close(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        if let Err(err) = self.host.close() {
            warn!(%err, "close failed");
        }
        self.state = SessionState::Terminated;
        info!("connection closed");
    }
}

impl<H: SimHost> Drop for Session<H> {
    fn drop(&mut self) {
        self.close();
    }
}

fn log_line(line: String) -> String {
    info!("{}", line);
    line
}
