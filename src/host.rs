use crate::data::DataType;
use crate::error::{DecodeError, HostError};
use crate::recv::Message;

#[cfg(test)]
pub mod mock;

/// `SIMCONNECT_SIMOBJECT_TYPE_USER`
pub const SIMOBJECT_TYPE_USER: u32 = 0;

/// The simulator side of a session. One value is one open connection.
pub trait SimHost {
    fn subscribe_to_system_event(&mut self, event_id: u32, name: &str) -> Result<(), HostError>;

    fn map_client_event_to_sim_event(&mut self, event_id: u32, name: &str)
        -> Result<(), HostError>;

    fn add_client_event_to_notification_group(
        &mut self,
        group_id: u32,
        event_id: u32,
        maskable: bool,
    ) -> Result<(), HostError>;

    fn set_notification_group_priority(
        &mut self,
        group_id: u32,
        priority: u32,
    ) -> Result<(), HostError>;

    /// `units` is `None` for structured datatypes.
    fn add_to_data_definition(
        &mut self,
        define_id: u32,
        datum_name: &str,
        units: Option<&str>,
        data_type: DataType,
    ) -> Result<(), HostError>;

    fn request_data_on_sim_object_type(
        &mut self,
        request_id: u32,
        define_id: u32,
        radius_meters: u32,
        object_type: u32,
    ) -> Result<(), HostError>;

    /// Next pending message, `None` once the queue is empty. Never blocks.
    fn next_message(&mut self) -> Option<Result<Message, DecodeError>>;

    fn close(&mut self) -> Result<(), HostError>;
}
