use super::SimHost;
use crate::data::DataType;
use crate::error::{DecodeError, HostError};
use crate::recv::Message;
use std::collections::VecDeque;

/// Calls the session made, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SubscribeToSystemEvent(u32, String),
    MapClientEvent(u32, String),
    AddToGroup { group_id: u32, event_id: u32, maskable: bool },
    SetGroupPriority(u32, u32),
    AddToDataDefinition {
        define_id: u32,
        datum_name: String,
        units: Option<String>,
        data_type: DataType,
    },
    RequestData { request_id: u32, define_id: u32 },
    Close,
}

/// In-memory host: hands out queued messages and records every call.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub queue: VecDeque<Result<Message, DecodeError>>,
    pub calls: Vec<Call>,
    /// Host calls with these names fail with `E_FAIL`.
    pub failing: Vec<&'static str>,
    /// Pushed to the queue on every data request.
    pub on_request: Option<Message>,
    closed: bool,
}

const E_FAIL: i32 = 0x8000_4005_u32 as i32;

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(messages: impl IntoIterator<Item = Message>) -> Self {
        let mut host = Self::new();
        host.push_all(messages);
        host
    }

    pub fn push(&mut self, message: Message) {
        self.queue.push_back(Ok(message));
    }

    pub fn push_all(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.queue.extend(messages.into_iter().map(Ok));
    }

    pub fn push_raw(&mut self, raw: &[u8]) {
        self.queue.push_back(Message::decode(raw));
    }

    pub fn close_calls(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Close).count()
    }

    fn call(&mut self, name: &'static str, call: Call) -> Result<(), HostError> {
        if self.closed {
            return Err(HostError::Closed);
        }
        self.calls.push(call);
        if self.failing.contains(&name) {
            Err(HostError::Failed {
                call: name,
                hresult: E_FAIL,
            })
        } else {
            Ok(())
        }
    }
}

impl SimHost for ScriptedHost {
    fn subscribe_to_system_event(&mut self, event_id: u32, name: &str) -> Result<(), HostError> {
        self.call(
            "SubscribeToSystemEvent",
            Call::SubscribeToSystemEvent(event_id, name.to_string()),
        )
    }

    fn map_client_event_to_sim_event(
        &mut self,
        event_id: u32,
        name: &str,
    ) -> Result<(), HostError> {
        self.call(
            "MapClientEventToSimEvent",
            Call::MapClientEvent(event_id, name.to_string()),
        )
    }

    fn add_client_event_to_notification_group(
        &mut self,
        group_id: u32,
        event_id: u32,
        maskable: bool,
    ) -> Result<(), HostError> {
        self.call(
            "AddClientEventToNotificationGroup",
            Call::AddToGroup {
                group_id,
                event_id,
                maskable,
            },
        )
    }

    fn set_notification_group_priority(
        &mut self,
        group_id: u32,
        priority: u32,
    ) -> Result<(), HostError> {
        self.call(
            "SetNotificationGroupPriority",
            Call::SetGroupPriority(group_id, priority),
        )
    }

    fn add_to_data_definition(
        &mut self,
        define_id: u32,
        datum_name: &str,
        units: Option<&str>,
        data_type: DataType,
    ) -> Result<(), HostError> {
        self.call(
            "AddToDataDefinition",
            Call::AddToDataDefinition {
                define_id,
                datum_name: datum_name.to_string(),
                units: units.map(str::to_string),
                data_type,
            },
        )
    }

    fn request_data_on_sim_object_type(
        &mut self,
        request_id: u32,
        define_id: u32,
        _radius_meters: u32,
        _object_type: u32,
    ) -> Result<(), HostError> {
        self.call(
            "RequestDataOnSimObjectType",
            Call::RequestData {
                request_id,
                define_id,
            },
        )?;
        if let Some(message) = self.on_request.clone() {
            self.push(message);
        }
        Ok(())
    }

    fn next_message(&mut self) -> Option<Result<Message, DecodeError>> {
        if self.closed {
            return None;
        }
        self.queue.pop_front()
    }

    fn close(&mut self) -> Result<(), HostError> {
        self.calls.push(Call::Close);
        self.closed = true;
        Ok(())
    }
}
